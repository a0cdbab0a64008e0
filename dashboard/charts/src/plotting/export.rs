use chrono::{DateTime, Utc};

/// File name for the "save as image" action: the title stem suffixed with the unix time in
/// seconds.
pub fn export_file_name(title: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", file_stem(title), now.timestamp())
}

/// The title with whitespace runs collapsed to underscores, lower-cased.
pub fn file_stem(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn export_name_should_collapse_whitespace_and_lowercase() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(
            export_file_name("Total  Requests per\tSecond", now),
            "total_requests_per_second_1700000000"
        );
        assert_eq!(
            export_file_name("Response Times (ms)", now),
            "response_times_(ms)_1700000000"
        );
    }

    #[test]
    fn file_stem_should_not_carry_a_timestamp() {
        assert_eq!(file_stem("Number of Users"), "number_of_users");
    }
}
