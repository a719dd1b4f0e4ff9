use chrono::TimeDelta;

quantity!(Hours, via: f64, suffix: "h", precision: 2);

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_time_delta() {
        assert_eq!(Hours::from(TimeDelta::minutes(90)), Hours(1.5));
        assert_eq!(Hours::from(TimeDelta::minutes(-30)), Hours(-0.5));
    }
}
