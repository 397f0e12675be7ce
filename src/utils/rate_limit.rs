use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use log::warn;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket_okapi::request::OpenApiFromRequest;

pub const MAX_REQUESTS_PER_MINUTE: usize = 10;
pub const MAX_REQUESTS_PER_HOUR: usize = 100;

// Hard cap on distinct tracked addresses; beyond it, idle clients are evicted
const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Debug)]
pub struct RateLimitExceeded;

#[derive(Debug, Default)]
struct ClientWindows {
    minute: VecDeque<DateTime<Utc>>,
    hour: VecDeque<DateTime<Utc>>,
}

impl ClientWindows {
    fn prune(&mut self, now: DateTime<Utc>) {
        let minute_ago = now - Duration::minutes(1);
        while self.minute.front().is_some_and(|t| *t <= minute_ago) {
            self.minute.pop_front();
        }
        let hour_ago = now - Duration::hours(1);
        while self.hour.front().is_some_and(|t| *t <= hour_ago) {
            self.hour.pop_front();
        }
    }

    fn is_empty(&self) -> bool {
        self.minute.is_empty() && self.hour.is_empty()
    }
}

/// Per-client sliding-window request limiter. One instance is shared through
/// Rocket managed state; both the check and the recording of the current
/// request happen under a single lock acquisition.
#[derive(Default)]
pub struct RateLimiter {
    clients: Mutex<HashMap<IpAddr, ClientWindows>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, client: IpAddr) -> Result<(), RateLimitExceeded> {
        self.check_at(client, Utc::now())
    }

    pub fn check_at(&self, client: IpAddr, now: DateTime<Utc>) -> Result<(), RateLimitExceeded> {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        if clients.len() >= MAX_TRACKED_CLIENTS && !clients.contains_key(&client) {
            clients.retain(|_, windows| {
                windows.prune(now);
                !windows.is_empty()
            });
        }

        let windows = clients.entry(client).or_default();
        windows.prune(now);

        if windows.minute.len() >= MAX_REQUESTS_PER_MINUTE
            || windows.hour.len() >= MAX_REQUESTS_PER_HOUR
        {
            return Err(RateLimitExceeded);
        }

        windows.minute.push_back(now);
        windows.hour.push_back(now);
        Ok(())
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Resolve the client address the way a proxy-fronted deployment expects:
/// X-Forwarded-For first, then X-Real-IP, then the socket peer.
pub fn client_ip(request: &Request<'_>) -> IpAddr {
    if let Some(forwarded) = request.headers().get_one("X-Forwarded-For") {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse() {
                return ip;
            }
        }
    }
    if let Some(real_ip) = request.headers().get_one("X-Real-IP") {
        if let Ok(ip) = real_ip.trim().parse() {
            return ip;
        }
    }
    request
        .client_ip()
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Request guard enforcing the login/register rate limit. Routes that carry
/// it reject over-limit clients with 429 before the handler runs.
#[derive(Debug, OpenApiFromRequest)]
pub struct RateLimited;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RateLimited {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let limiter = match request.rocket().state::<RateLimiter>() {
            Some(limiter) => limiter,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        let client = client_ip(request);
        match limiter.check(client) {
            Ok(()) => Outcome::Success(RateLimited),
            Err(RateLimitExceeded) => {
                warn!("rate limit exceeded for {} on {}", client, request.uri().path());
                Outcome::Error((Status::TooManyRequests, ()))
            }
        }
    }
}
