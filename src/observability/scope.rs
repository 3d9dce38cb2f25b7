//! Per-request observation scope
//!
//! - Logs `REQUEST_BEGIN` on creation
//! - Logs `REQUEST_COMPLETE` with row count and elapsed time on success
//! - Logs `REQUEST_FAILED` at ERROR on failure
//! - Logs `REQUEST_REJECTED` at WARN when request parameters are invalid
//! - Logs `REQUEST_INCOMPLETE` at WARN if dropped without any of these

use std::time::Instant;

use super::logger::Logger;

/// Observation scope around one API request
#[derive(Debug)]
pub struct RequestScope {
    route: &'static str,
    started: Instant,
    finished: bool,
}

impl RequestScope {
    /// Start observing a request to `route`
    pub fn begin(route: &'static str) -> Self {
        Logger::info("REQUEST_BEGIN", &[("route", route)]);
        Self {
            route,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn route(&self) -> &'static str {
        self.route
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    /// Request succeeded with `rows` result rows
    pub fn complete(mut self, rows: usize) {
        self.finished = true;
        let rows = rows.to_string();
        let elapsed = self.elapsed_ms().to_string();
        Logger::info(
            "REQUEST_COMPLETE",
            &[("route", self.route), ("rows", rows.as_str()), ("elapsed_ms", elapsed.as_str())],
        );
    }

    /// Request failed
    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        let elapsed = self.elapsed_ms().to_string();
        Logger::error(
            "REQUEST_FAILED",
            &[("route", self.route), ("reason", reason), ("elapsed_ms", elapsed.as_str())],
        );
    }

    /// Request refused before reaching the store
    pub fn reject(mut self, reason: &str) {
        self.finished = true;
        let elapsed = self.elapsed_ms().to_string();
        Logger::warn(
            "REQUEST_REJECTED",
            &[("route", self.route), ("reason", reason), ("elapsed_ms", elapsed.as_str())],
        );
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                "REQUEST_INCOMPLETE",
                &[("route", self.route), ("reason", "request dropped before completion")],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_begin() {
        let scope = RequestScope::begin("stations");
        assert_eq!(scope.route(), "stations");
        assert!(!scope.is_finished());
        scope.complete(0);
    }

    #[test]
    fn test_scope_fail() {
        let scope = RequestScope::begin("tobs");
        scope.fail("database is locked");
    }

    #[test]
    fn test_scope_reject() {
        let scope = RequestScope::begin("stats_from_start");
        assert!(!scope.is_finished());
        scope.reject("'2010-1-1' is not a YYYY-MM-DD date");
    }

    #[test]
    fn test_scope_dropped_unfinished() {
        // Logs a warning, must not panic
        let scope = RequestScope::begin("precipitation");
        drop(scope);
    }

    #[test]
    fn test_elapsed_increases() {
        let scope = RequestScope::begin("stats");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(scope.elapsed_ms() >= 5);
        scope.complete(1);
    }
}
