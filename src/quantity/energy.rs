use std::fmt::{Debug, Display, Formatter};

quantity!(KilowattHours);

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_hundredths() {
        assert_abs_diff_eq!(KilowattHours(1.005_1).round_to_hundredths().0, 1.01);
        assert_abs_diff_eq!(KilowattHours(1.004_9).round_to_hundredths().0, 1.0);
    }
}
