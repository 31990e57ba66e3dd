use std::fmt;

use crate::schedule::Schedule;

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "every {} min from {:02}:{:02} to {:02}:{:02}",
            self.interval_minutes(),
            self.start().hour(),
            self.start().minute(),
            self.end().hour(),
            self.end().minute(),
        )
    }
}
