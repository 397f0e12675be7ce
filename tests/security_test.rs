use matchday_booking_system::{
    models::user::Role,
    utils::{jwt, password, rate_limit::RateLimiter},
};
use chrono::{Duration, TimeZone, Utc};
use std::env;
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn test_password_policy_accepts_strong_passwords() {
    for candidate in ["Str4ngeDays!", "Kickoff#2026", "Ab1!ekgm"] {
        let check = password::validate_password(candidate);
        assert!(
            check.is_valid(),
            "{} should pass, got: {}",
            candidate,
            check.error_message()
        );
    }
}

#[test]
fn test_password_policy_rejects_short_password() {
    let check = password::validate_password("Ab1!xyQ");
    assert!(!check.is_valid());
    assert!(
        check.error_message().contains("at least 8 characters"),
        "got: {}",
        check.error_message()
    );
}

#[test]
fn test_password_policy_rejects_missing_character_classes() {
    let cases = [
        ("valid.pw1x", "uppercase letter"),
        ("VALID.PW1X", "lowercase letter"),
        ("Validd.Pwx", "digit"),
        ("Validd9Pwx", "special character"),
    ];
    for (candidate, expected) in cases {
        let check = password::validate_password(candidate);
        assert_eq!(
            check.errors().len(),
            1,
            "{} should break exactly one rule, got: {}",
            candidate,
            check.error_message()
        );
        assert!(
            check.error_message().contains(expected),
            "{} should complain about the {}, got: {}",
            candidate,
            expected,
            check.error_message()
        );
    }
}

#[test]
fn test_password_policy_rejects_common_words() {
    // The blacklist matches case-insensitive substrings
    for candidate in ["MyTestPass9!", "Qwerty#2026x"] {
        let check = password::validate_password(candidate);
        assert_eq!(check.errors().len(), 1, "got: {}", check.error_message());
        assert!(
            check.error_message().contains("common or easily guessable"),
            "got: {}",
            check.error_message()
        );
    }
}

#[test]
fn test_password_policy_rejects_sequential_runs() {
    for candidate in ["Tick3t#789", "Goal#xyz19"] {
        let check = password::validate_password(candidate);
        assert_eq!(check.errors().len(), 1, "got: {}", check.error_message());
        assert!(
            check.error_message().contains("sequential characters"),
            "got: {}",
            check.error_message()
        );
    }

    // A case break interrupts the run
    let check = password::validate_password("Goal#xYz19");
    assert!(check.is_valid(), "got: {}", check.error_message());
}

#[test]
fn test_password_policy_rejects_repeated_runs() {
    for candidate in ["Gooo@al19", "G!!!oal19"] {
        let check = password::validate_password(candidate);
        assert_eq!(check.errors().len(), 1, "got: {}", check.error_message());
        assert!(
            check.error_message().contains("repeated characters"),
            "got: {}",
            check.error_message()
        );
    }
}

#[test]
fn test_password_policy_rejects_overlong_password() {
    let candidate = format!("Aa1!{}", "xw".repeat(63));
    assert_eq!(candidate.chars().count(), 130);

    let check = password::validate_password(&candidate);
    assert_eq!(check.errors().len(), 1, "got: {}", check.error_message());
    assert!(
        check.error_message().contains("cannot exceed 128"),
        "got: {}",
        check.error_message()
    );
}

#[test]
fn test_password_policy_empty_password() {
    for candidate in ["", "   "] {
        let check = password::validate_password(candidate);
        assert_eq!(check.errors(), ["Password cannot be empty"]);
    }
}

#[test]
fn test_password_policy_reports_all_violations_at_once() {
    let check = password::validate_password("abc");
    // Too short, no uppercase, no digit, no special character, sequential
    assert_eq!(check.errors().len(), 5, "got: {}", check.error_message());
    assert!(check.error_message().contains("; "), "Messages are joined for display");
}

#[test]
fn test_rate_limiter_minute_cap_and_refill() {
    let limiter = RateLimiter::new();
    let client: IpAddr = "203.0.113.10".parse().unwrap();
    let base = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

    for i in 0..10 {
        assert!(
            limiter.check_at(client, base + Duration::seconds(i)).is_ok(),
            "Request {} should be within the minute budget",
            i + 1
        );
    }
    assert!(
        limiter.check_at(client, base + Duration::seconds(10)).is_err(),
        "The 11th request within a minute is rejected"
    );

    // 61 seconds after the first request the oldest entries have aged out
    assert!(limiter.check_at(client, base + Duration::seconds(61)).is_ok());
}

#[test]
fn test_rate_limiter_hour_cap() {
    let limiter = RateLimiter::new();
    let client: IpAddr = "203.0.113.20".parse().unwrap();
    let base = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();

    // 100 requests spread over ten minutes, never breaking the minute cap
    for minute in 0..10 {
        for second in 0..10 {
            let at = base + Duration::minutes(minute) + Duration::seconds(second);
            assert!(limiter.check_at(client, at).is_ok());
        }
    }

    // The minute window is clear half an hour later, the hour window is not
    assert!(limiter.check_at(client, base + Duration::minutes(30)).is_err());

    // 70 minutes in, everything has aged out
    assert!(limiter.check_at(client, base + Duration::minutes(70)).is_ok());
}

#[test]
fn test_rate_limiter_tracks_clients_independently() {
    let limiter = RateLimiter::new();
    let noisy: IpAddr = "203.0.113.30".parse().unwrap();
    let quiet: IpAddr = "203.0.113.31".parse().unwrap();
    let base = Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap();

    for i in 0..10 {
        assert!(limiter.check_at(noisy, base + Duration::seconds(i)).is_ok());
    }
    assert!(limiter.check_at(noisy, base + Duration::seconds(10)).is_err());
    assert!(
        limiter.check_at(quiet, base + Duration::seconds(10)).is_ok(),
        "One noisy client must not affect another"
    );
}

#[test]
fn test_rate_limiter_evicts_idle_clients() {
    let limiter = RateLimiter::new();
    let base = Utc.with_ymd_and_hms(2026, 8, 1, 18, 0, 0).unwrap();

    for i in 0..10_000u32 {
        let client = IpAddr::V4(Ipv4Addr::from(0x0A00_0000 + i));
        assert!(limiter.check_at(client, base).is_ok());
    }
    assert_eq!(limiter.tracked_clients(), 10_000);

    // A new client two hours later triggers eviction of everything idle
    let late: IpAddr = "203.0.113.40".parse().unwrap();
    assert!(limiter.check_at(late, base + Duration::hours(2)).is_ok());
    assert_eq!(limiter.tracked_clients(), 1, "Idle clients were dropped before tracking a new one");
}

#[test]
fn test_jwt_round_trip() {
    env::set_var("JWT_SECRET", "matchday-test-secret");

    let token = jwt::generate_token("gatekeeper", Role::Cashier).expect("Token should be issued");
    let claims = jwt::decode_token(&token).expect("Fresh token should decode");

    assert_eq!(claims.sub, "gatekeeper");
    assert_eq!(claims.role, Role::Cashier);
    assert!(claims.exp > Utc::now().timestamp() as usize, "Expiry lies in the future");
}

#[test]
fn test_jwt_rejects_tampered_token() {
    env::set_var("JWT_SECRET", "matchday-test-secret");

    let token = jwt::generate_token("gatekeeper", Role::User).expect("Token should be issued");
    let mut bytes = token.into_bytes();
    let last = bytes.last_mut().unwrap();
    *last = if *last == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert!(jwt::decode_token(&tampered).is_err());
}
