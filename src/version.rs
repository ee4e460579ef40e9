//! API-version negotiation table.
//!
//! OpenStack services take a microversion header naming the API contract
//! a request was written against. Which header (and which version) is a
//! pure function of the URL path, so the mapping lives here as plain
//! configuration data: an ordered list of path prefixes, first match wins.

/// One negotiation rule: requests whose path starts with `prefix` carry
/// the header `header: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionRule {
    pub prefix: String,
    pub header: String,
    pub value: String,
}

impl ApiVersionRule {
    pub fn new(prefix: &str, header: &str, value: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            header: header.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ordered prefix table consulted once per dispatch.
#[derive(Debug, Clone, Default)]
pub struct ApiVersionTable {
    rules: Vec<ApiVersionRule>,
}

impl ApiVersionTable {
    /// An empty table: no request gets a version header.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(rules: Vec<ApiVersionRule>) -> Self {
        Self { rules }
    }

    /// The microversions the dashboard pins for stock OpenStack services.
    pub fn openstack_defaults() -> Self {
        Self::new(vec![
            ApiVersionRule::new(
                "/api/openstack/compute",
                "Openstack-Api-Version",
                "compute 2.79",
            ),
            ApiVersionRule::new(
                "/api/openstack/placement",
                "Openstack-Api-Version",
                "placement 1.28",
            ),
            ApiVersionRule::new(
                "/api/openstack/volume",
                "Openstack-Api-Version",
                "volume 3.59",
            ),
            ApiVersionRule::new(
                "/api/openstack/manila",
                "X-Openstack-Manila-Api-Version",
                "2.55",
            ),
        ])
    }

    /// Find the rule for a request path. Pure lookup, no side effects;
    /// `None` means the request goes out without a version header.
    pub fn lookup(&self, path: &str) -> Option<&ApiVersionRule> {
        self.rules.iter().find(|rule| path.starts_with(&rule.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_known_prefix() {
        let table = ApiVersionTable::openstack_defaults();
        let rule = table.lookup("/api/openstack/compute/servers").unwrap();
        assert_eq!(rule.header, "Openstack-Api-Version");
        assert_eq!(rule.value, "compute 2.79");
    }

    #[test]
    fn lookup_misses_unconfigured_prefix() {
        let table = ApiVersionTable::openstack_defaults();
        assert!(table.lookup("/api/openstack/keystone/users").is_none());
        assert!(table.lookup("/unrelated").is_none());
    }

    #[test]
    fn lookup_is_prefix_anchored() {
        let table = ApiVersionTable::openstack_defaults();
        // The service name appearing mid-path is not a match.
        assert!(table.lookup("/api/other/compute/servers").is_none());
    }

    #[test]
    fn first_match_wins() {
        let table = ApiVersionTable::new(vec![
            ApiVersionRule::new("/api/v2", "X-Api-Version", "2.1"),
            ApiVersionRule::new("/api", "X-Api-Version", "1.0"),
        ]);
        assert_eq!(table.lookup("/api/v2/things").unwrap().value, "2.1");
        assert_eq!(table.lookup("/api/v1/things").unwrap().value, "1.0");
    }

    #[test]
    fn empty_table_never_matches() {
        assert!(ApiVersionTable::empty().lookup("/api/openstack/compute").is_none());
    }
}
