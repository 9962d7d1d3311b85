use std::fmt::{Debug, Display, Formatter};

use crate::quantity::{energy::KilowattHours, time::DailyHours};

quantity!(Watts);

impl Watts {
    /// Estimated energy over a 30-day month at the given daily usage.
    pub fn over_month(self, hours: DailyHours) -> KilowattHours {
        KilowattHours(self.0 * hours.0 * 30.0 / 1000.0)
    }
}

impl Display for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} W", self.0)
    }
}

impl Debug for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}W", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_over_month() {
        assert_abs_diff_eq!(Watts(100.0).over_month(DailyHours(2.0)).0, 6.0);
    }
}
