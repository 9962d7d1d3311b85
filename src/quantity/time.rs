use std::fmt::{Debug, Display, Formatter};

quantity!(DailyHours);

impl Display for DailyHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} h/day", self.0)
    }
}

impl Debug for DailyHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.0)
    }
}
