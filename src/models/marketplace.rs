use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    UnitedStates,
    UnitedKingdom,
    Canada,
    Germany,
    France,
    Italy,
    Spain,
    India,
    Japan,
    Australia,
}

impl Marketplace {
    pub const ALL: [Marketplace; 10] = [
        Marketplace::UnitedStates,
        Marketplace::UnitedKingdom,
        Marketplace::Canada,
        Marketplace::Germany,
        Marketplace::France,
        Marketplace::Italy,
        Marketplace::Spain,
        Marketplace::India,
        Marketplace::Japan,
        Marketplace::Australia,
    ];

    pub fn domain(&self) -> &'static str {
        match self {
            Marketplace::UnitedStates => "amazon.com",
            Marketplace::UnitedKingdom => "amazon.co.uk",
            Marketplace::Canada => "amazon.ca",
            Marketplace::Germany => "amazon.de",
            Marketplace::France => "amazon.fr",
            Marketplace::Italy => "amazon.it",
            Marketplace::Spain => "amazon.es",
            Marketplace::India => "amazon.in",
            Marketplace::Japan => "amazon.co.jp",
            Marketplace::Australia => "amazon.com.au",
        }
    }

    /// Match a (lowercase) host against the allow-list. Subdomains such as
    /// `www.` or `smile.` are accepted, lookalikes such as `notamazon.com` are not.
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_end_matches('.');
        Self::ALL.into_iter().find(|marketplace| {
            let domain = marketplace.domain();
            host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Marketplace::UnitedStates => "United States",
            Marketplace::UnitedKingdom => "United Kingdom",
            Marketplace::Canada => "Canada",
            Marketplace::Germany => "Germany",
            Marketplace::France => "France",
            Marketplace::Italy => "Italy",
            Marketplace::Spain => "Spain",
            Marketplace::India => "India",
            Marketplace::Japan => "Japan",
            Marketplace::Australia => "Australia",
        };
        write!(f, "{} ({})", label, self.domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_www_hosts_resolve() {
        assert_eq!(Marketplace::from_host("amazon.com"), Some(Marketplace::UnitedStates));
        assert_eq!(Marketplace::from_host("www.amazon.co.uk"), Some(Marketplace::UnitedKingdom));
        assert_eq!(Marketplace::from_host("www.amazon.com.au"), Some(Marketplace::Australia));
        assert_eq!(Marketplace::from_host("smile.amazon.de"), Some(Marketplace::Germany));
    }

    #[test]
    fn lookalike_hosts_are_rejected() {
        assert_eq!(Marketplace::from_host("notamazon.com"), None);
        assert_eq!(Marketplace::from_host("amazon.com.evil.io"), None);
        assert_eq!(Marketplace::from_host("amazon.nl"), None);
    }
}
