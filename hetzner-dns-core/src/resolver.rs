//! Entity resolution
//!
//! Narrows a candidate list (records of a zone, zones of an account) down to
//! the entities an operation should act on. Matching is exact equality over
//! the criteria that are present; the multiplicity policy then decides what
//! happens when more than one entity survives.

use hetzner_dns_provider::{Record, RecordType, Zone};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An entity with a stable identifier.
pub trait Resolvable {
    fn id(&self) -> &str;
}

impl Resolvable for Zone {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resolvable for Record {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A set of optional, conjunctive equality constraints over `T`.
pub trait Criteria<T> {
    /// No constraint is set.
    fn is_empty(&self) -> bool;

    /// Every present constraint equals the entity's field.
    fn matches(&self, entity: &T) -> bool;
}

/// Record filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub name: Option<String>,
    pub record_type: Option<RecordType>,
    pub value: Option<String>,
    pub ttl: Option<u32>,
}

impl Criteria<Record> for RecordFilter {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.record_type.is_none()
            && self.value.is_none()
            && self.ttl.is_none()
    }

    fn matches(&self, record: &Record) -> bool {
        // A record without its own TTL never matches a TTL constraint
        self.name.as_ref().is_none_or(|n| *n == record.name)
            && self
                .record_type
                .as_ref()
                .is_none_or(|t| *t == record.record_type)
            && self.value.as_ref().is_none_or(|v| *v == record.value)
            && self.ttl.is_none_or(|t| record.ttl == Some(t))
    }
}

/// Zone filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneFilter {
    pub name: Option<String>,
    pub ttl: Option<u32>,
}

impl Criteria<Zone> for ZoneFilter {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.ttl.is_none()
    }

    fn matches(&self, zone: &Zone) -> bool {
        self.name.as_ref().is_none_or(|n| *n == zone.name)
            && self.ttl.is_none_or(|t| t == zone.ttl)
    }
}

/// What to do when more than one entity matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiplicityPolicy {
    /// More than one match is an error.
    #[default]
    Strict,
    /// Take the first match in upstream order.
    FirstOnly,
    /// Return every match in upstream order.
    AllowMultiple,
}

impl MultiplicityPolicy {
    /// Builds the policy from the two opt-in flags.
    pub fn from_flags(first_only: bool, allow_multiple: bool) -> CoreResult<Self> {
        match (first_only, allow_multiple) {
            (true, true) => Err(CoreError::InvalidPolicyCombination),
            (true, false) => Ok(Self::FirstOnly),
            (false, true) => Ok(Self::AllowMultiple),
            (false, false) => Ok(Self::Strict),
        }
    }
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved<T> {
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Resolved<T> {
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens into upstream order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => Vec::new(),
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// Exactly one entity, else `NotFound(what)` or `AmbiguousResult`.
    pub fn into_single(self, what: impl FnOnce() -> String) -> CoreResult<T> {
        match self {
            Self::None => Err(CoreError::NotFound(what())),
            Self::One(item) => Ok(item),
            Self::Many(items) => Err(CoreError::AmbiguousResult(items.len())),
        }
    }
}

impl<T: Resolvable> Resolved<T> {
    /// Id-only projection, keeping the shape.
    pub fn ids(&self) -> Resolved<String> {
        match self {
            Self::None => Resolved::None,
            Self::One(item) => Resolved::One(item.id().to_string()),
            Self::Many(items) => Resolved::Many(items.iter().map(|i| i.id().to_string()).collect()),
        }
    }
}

/// Filters `candidates` by `criteria` and applies `policy`.
///
/// `scoped` says a zone (or the all-zones override) already bounded the
/// candidate list; only then may `criteria` be empty.
pub fn resolve<T, C>(
    candidates: Vec<T>,
    criteria: &C,
    scoped: bool,
    policy: MultiplicityPolicy,
) -> CoreResult<Resolved<T>>
where
    C: Criteria<T>,
{
    let mut matches: Vec<T> = if criteria.is_empty() {
        if !scoped {
            return Err(CoreError::InsufficientCriteria);
        }
        candidates
    } else {
        candidates
            .into_iter()
            .filter(|c| criteria.matches(c))
            .collect()
    };

    match matches.len() {
        0 => Ok(Resolved::None),
        1 => Ok(Resolved::One(matches.remove(0))),
        count => match policy {
            MultiplicityPolicy::Strict => Err(CoreError::AmbiguousResult(count)),
            MultiplicityPolicy::FirstOnly => Ok(Resolved::One(matches.remove(0))),
            MultiplicityPolicy::AllowMultiple => Ok(Resolved::Many(matches)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{record, zone};

    fn www_www_api() -> Vec<Record> {
        vec![
            record("r1", "z1", "www", RecordType::A, "192.0.2.1"),
            record("r2", "z1", "www", RecordType::A, "192.0.2.2"),
            record("r3", "z1", "api", RecordType::A, "192.0.2.3"),
        ]
    }

    fn by_name(name: &str) -> RecordFilter {
        RecordFilter {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn strict_rejects_duplicates() {
        let result = resolve(www_www_api(), &by_name("www"), true, MultiplicityPolicy::Strict);
        assert!(matches!(result, Err(CoreError::AmbiguousResult(2))));
    }

    #[test]
    fn first_only_takes_upstream_first() {
        let result =
            resolve(www_www_api(), &by_name("www"), true, MultiplicityPolicy::FirstOnly).unwrap();
        assert_eq!(result.ids(), Resolved::One("r1".to_string()));
    }

    #[test]
    fn allow_multiple_keeps_order() {
        let result = resolve(
            www_www_api(),
            &by_name("www"),
            true,
            MultiplicityPolicy::AllowMultiple,
        )
        .unwrap();
        assert_eq!(
            result.ids(),
            Resolved::Many(vec!["r1".to_string(), "r2".to_string()])
        );
    }

    #[test]
    fn single_match_is_one_under_every_policy() {
        for policy in [
            MultiplicityPolicy::Strict,
            MultiplicityPolicy::FirstOnly,
            MultiplicityPolicy::AllowMultiple,
        ] {
            let result = resolve(www_www_api(), &by_name("api"), true, policy).unwrap();
            assert_eq!(result.ids(), Resolved::One("r3".to_string()), "{policy:?}");
        }
    }

    #[test]
    fn missing_name_is_none() {
        let result =
            resolve(www_www_api(), &by_name("missing"), true, MultiplicityPolicy::Strict).unwrap();
        assert_eq!(result, Resolved::None);
    }

    #[test]
    fn empty_candidates_are_none_for_every_policy() {
        for policy in [
            MultiplicityPolicy::Strict,
            MultiplicityPolicy::FirstOnly,
            MultiplicityPolicy::AllowMultiple,
        ] {
            let result = resolve(Vec::<Record>::new(), &by_name("www"), true, policy).unwrap();
            assert!(result.is_empty());
        }
    }

    #[test]
    fn empty_criteria_with_scope_keeps_everything() {
        let result = resolve(
            www_www_api(),
            &RecordFilter::default(),
            true,
            MultiplicityPolicy::AllowMultiple,
        )
        .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn empty_criteria_with_scope_still_honors_strict() {
        let result = resolve(
            www_www_api(),
            &RecordFilter::default(),
            true,
            MultiplicityPolicy::Strict,
        );
        assert!(matches!(result, Err(CoreError::AmbiguousResult(3))));
    }

    #[test]
    fn empty_criteria_without_scope_is_insufficient() {
        let result = resolve(
            www_www_api(),
            &RecordFilter::default(),
            false,
            MultiplicityPolicy::AllowMultiple,
        );
        assert!(matches!(result, Err(CoreError::InsufficientCriteria)));
    }

    #[test]
    fn criteria_are_conjunctive() {
        let filter = RecordFilter {
            name: Some("www".to_string()),
            value: Some("192.0.2.2".to_string()),
            ..Default::default()
        };
        let result = resolve(www_www_api(), &filter, true, MultiplicityPolicy::Strict).unwrap();
        assert_eq!(result.ids(), Resolved::One("r2".to_string()));
    }

    #[test]
    fn allow_multiple_has_no_false_positives_or_negatives() {
        let candidates = www_www_api();
        let filter = RecordFilter {
            record_type: Some(RecordType::A),
            ..Default::default()
        };
        let expected: Vec<&str> = candidates
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id.as_str())
            .collect();

        let result = resolve(
            candidates.clone(),
            &filter,
            true,
            MultiplicityPolicy::AllowMultiple,
        )
        .unwrap();
        let got = result.into_vec();
        assert_eq!(got.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), expected);
        assert!(got.iter().all(|r| filter.matches(r)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let filter = by_name("www");
        let first = resolve(www_www_api(), &filter, true, MultiplicityPolicy::AllowMultiple)
            .unwrap()
            .ids();
        let second = resolve(www_www_api(), &filter, true, MultiplicityPolicy::AllowMultiple)
            .unwrap()
            .ids();
        assert_eq!(first, second);
    }

    #[test]
    fn ttl_constraint_skips_records_without_ttl() {
        let mut inherited = record("r9", "z1", "www", RecordType::A, "192.0.2.9");
        inherited.ttl = None;
        let filter = RecordFilter {
            ttl: Some(300),
            ..Default::default()
        };
        assert!(!filter.matches(&inherited));
    }

    #[test]
    fn record_type_constraint() {
        let mx = record("r4", "z1", "@", RecordType::Mx, "10 mail.example.com");
        let filter = RecordFilter {
            record_type: Some(RecordType::Txt),
            ..Default::default()
        };
        assert!(!filter.matches(&mx));
    }

    #[test]
    fn zone_filter_matches_exact_name() {
        let zones = vec![zone("z1", "example.com"), zone("z2", "example.com.au")];
        let filter = ZoneFilter {
            name: Some("example.com".to_string()),
            ttl: None,
        };
        let result = resolve(zones, &filter, false, MultiplicityPolicy::Strict).unwrap();
        assert_eq!(result.ids(), Resolved::One("z1".to_string()));
    }

    #[test]
    fn policy_from_flags() {
        assert_eq!(
            MultiplicityPolicy::from_flags(false, false).unwrap(),
            MultiplicityPolicy::Strict
        );
        assert_eq!(
            MultiplicityPolicy::from_flags(true, false).unwrap(),
            MultiplicityPolicy::FirstOnly
        );
        assert_eq!(
            MultiplicityPolicy::from_flags(false, true).unwrap(),
            MultiplicityPolicy::AllowMultiple
        );
        assert!(matches!(
            MultiplicityPolicy::from_flags(true, true),
            Err(CoreError::InvalidPolicyCombination)
        ));
    }

    #[test]
    fn into_single_reports_shape() {
        assert!(matches!(
            Resolved::<String>::None.into_single(|| "record".to_string()),
            Err(CoreError::NotFound(w)) if w == "record"
        ));
        assert!(matches!(
            Resolved::Many(vec![1, 2, 3]).into_single(String::new),
            Err(CoreError::AmbiguousResult(3))
        ));
        assert_eq!(Resolved::One(7).into_single(String::new).unwrap(), 7);
    }

    #[test]
    fn unknown_type_filter_ignores_case() {
        let candidates = vec![
            record("r1", "z1", "@", RecordType::Other("HINFO".to_string()), "cpu os"),
            record("r2", "z1", "@", RecordType::Txt, "hello"),
        ];
        let filter = RecordFilter {
            record_type: Some(RecordType::from("hinfo".to_string())),
            ..Default::default()
        };
        let result = resolve(candidates, &filter, true, MultiplicityPolicy::Strict).unwrap();
        assert_eq!(result.ids(), Resolved::One("r1".to_string()));
    }
}
