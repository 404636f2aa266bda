//! Audio threshold trigger

/// Peak-to-peak amplitude of a time-domain byte buffer (0 when empty)
pub fn peak_to_peak(samples: &[u8]) -> u8 {
    let Some(&first) = samples.first() else {
        return 0;
    };
    let (min, max) = samples
        .iter()
        .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    max - min
}

/// Fires when a buffer's peak-to-peak amplitude exceeds `sensitivity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTrigger {
    pub sensitivity: u8,
}

impl AudioTrigger {
    pub fn new(sensitivity: u8) -> Self {
        Self { sensitivity }
    }

    pub fn fired(&self, samples: &[u8]) -> bool {
        peak_to_peak(samples) > self.sensitivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_to_peak() {
        assert_eq!(peak_to_peak(&[]), 0);
        assert_eq!(peak_to_peak(&[128; 64]), 0);
        assert_eq!(peak_to_peak(&[128, 200, 90, 128]), 110);
        assert_eq!(peak_to_peak(&[0, 255]), 255);
    }

    #[test]
    fn test_trigger_is_strictly_above_sensitivity() {
        let trigger = AudioTrigger::new(75);
        assert!(!trigger.fired(&[128, 128]));
        assert!(!trigger.fired(&[100, 175]));
        assert!(trigger.fired(&[100, 176]));
    }

    #[test]
    fn test_max_sensitivity_never_fires() {
        let trigger = AudioTrigger::new(255);
        assert!(!trigger.fired(&[0, 255]));
    }
}
