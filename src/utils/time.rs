use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Next modification timestamp for a row last touched at `previous`.
/// Always strictly later than `previous`, even within one clock tick.
pub fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    now().max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_strictly_monotonic() {
        let future = now() + Duration::hours(1);
        let next = advance(future);
        assert_eq!(next, future + Duration::microseconds(1));

        let past = now() - Duration::hours(1);
        assert!(advance(past) > past + Duration::minutes(59));
    }
}
