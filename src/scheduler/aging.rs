use crate::core::{MAX_PRIORITY, ProcessRecord};

/// One aging step for a record that sat in a queue through a full pass.
///
/// The countdown starts at zero after every dispatch, so the first pass a
/// record spends waiting already raises its priority.
pub fn age(record: &mut ProcessRecord) {
    record.waiting -= 1;

    if record.waiting <= 0 {
        record.waiting = 0;
        if record.priority < MAX_PRIORITY {
            record.priority += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_bumped() {
        let mut record = ProcessRecord::new(0, 5, 0);
        age(&mut record);
        assert_eq!(record.priority, 1);
        assert_eq!(record.waiting, 0);
    }

    #[test]
    fn test_capped_at_max() {
        let mut record = ProcessRecord::new(0, 5, 1);
        for _ in 0..5 {
            age(&mut record);
        }
        assert_eq!(record.priority, MAX_PRIORITY);
        assert_eq!(record.waiting, 0);
    }

    #[test]
    fn test_pending_countdown() {
        let mut record = ProcessRecord::new(0, 5, 0);
        record.waiting = 3;

        age(&mut record);
        assert_eq!(record.waiting, 2);
        assert_eq!(record.priority, 0);

        age(&mut record);
        age(&mut record);
        assert_eq!(record.waiting, 0);
        assert_eq!(record.priority, 1);
    }

    #[test]
    fn test_does_not_touch_burst() {
        let mut record = ProcessRecord::new(0, 5, 0);
        record.last_dispatch = Some(3);
        age(&mut record);
        assert_eq!(record.remaining, 5);
        assert_eq!(record.last_dispatch, Some(3));
    }
}
