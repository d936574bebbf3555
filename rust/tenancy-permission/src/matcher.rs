//! Decides whether a granted permission covers an asked permission.
//!
//! Both sides are canonical [`PermissionUri`]s. The comparison runs in order
//! and short-circuits:
//!
//! 1. A `public` ask always matches.
//! 2. Schemes must be equal.
//! 3. Hosts must be equal, unless the grant host is [`ANY_ADDRESS`] or the
//!    action is [`Action::Read`] (reads are checked through `owned.eoa`).
//! 4. Paths must be equal, unless the grant path is internal (`/_` prefix).
//! 5. Query values must satisfy the action-specific rules of
//!    [`matches_query`].
//!
//! Scheme, host and path compare case-insensitively.

use crate::{
    ANY_ADDRESS, Action, ContractSecurityAttribute, PermissionUri, QUERY_FROM_TM,
    QUERY_OWNED_EOA, QUERY_TO_EOA, Query, Visibility, intersects, subset,
};

/// Path prefix of operator-granted internal permissions that satisfy any
/// action.
pub const INTERNAL_PATH_PREFIX: &str = "/_";

/// Whether an ask is authorized by its visibility alone, without looking at
/// any grant.
pub fn is_public(ask: &PermissionUri) -> bool {
    ask.scheme().eq_ignore_ascii_case(Visibility::Public.as_str())
}

/// Whether `granted` covers `ask` for the given attribute.
pub fn matches(
    attribute: &ContractSecurityAttribute,
    ask: &PermissionUri,
    granted: &PermissionUri,
) -> bool {
    if is_public(ask) {
        return true;
    }

    ask.scheme().to_lowercase() == granted.scheme().to_lowercase()
        && matches_host(
            attribute.action,
            &ask.host().to_lowercase(),
            &granted.host().to_lowercase(),
        )
        && matches_path(&ask.path().to_lowercase(), &granted.path().to_lowercase())
        && matches_query(attribute.action, &ask.query(), &granted.query())
}

/// Whether the executing address of the ask is covered by the grant.
pub fn matches_host(action: Action, ask: &str, granted: &str) -> bool {
    granted == ANY_ADDRESS || ask == granted || action == Action::Read
}

/// Whether the asked action path is covered by the grant.
pub fn matches_path(ask: &str, granted: &str) -> bool {
    granted.starts_with(INTERNAL_PATH_PREFIX) || ask == granted
}

/// Whether the asked query values are covered by the granted ones.
///
/// An ask without any `from.tm` party never matches. Beyond that:
///
/// - read and write need at least one shared `from.tm` party, and every
///   `owned.eoa` / `to.eoa` value must be covered by the grant;
/// - create needs every asked value of every key covered by the grant.
///
/// Parties intersect rather than nest for reads and writes because a
/// transaction may be shared with several parties that no single grant lists
/// together.
pub fn matches_query(action: Action, ask: &Query, granted: &Query) -> bool {
    if ask.get(QUERY_FROM_TM).is_empty() {
        return false;
    }

    ask.iter().all(|(key, asked)| {
        let granted = granted.get(key);
        match action {
            Action::Read | Action::Write => match key {
                QUERY_FROM_TM => intersects(granted, asked),
                QUERY_OWNED_EOA | QUERY_TO_EOA => subset(granted, asked),
                _ => true,
            },
            Action::Create => subset(granted, asked),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Address;
    use anyhow::Result;
    use proptest::prelude::*;

    const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn private(action: Action, parties: &[&str]) -> Result<ContractSecurityAttribute> {
        Ok(ContractSecurityAttribute::builder()
            .private()
            .action(action)
            .from(ALICE.parse()?)
            .parties(parties.iter().copied())
            .build())
    }

    fn check(attribute: &ContractSecurityAttribute, granted: &str) -> Result<bool> {
        let ask = PermissionUri::ask(attribute)?;
        let granted: PermissionUri = granted.parse()?;
        Ok(matches(attribute, &ask, &granted))
    }

    #[test]
    fn it_matches_public_asks_against_anything() -> Result<()> {
        let attribute = ContractSecurityAttribute::builder()
            .public()
            .write()
            .from(ALICE.parse()?)
            .build();

        assert!(check(&attribute, "private://0x0/_/contracts")?);
        assert!(check(&attribute, &format!("private://{BOB}/read/contracts"))?);
        Ok(())
    }

    #[test]
    fn it_requires_same_scheme_for_private_asks() -> Result<()> {
        let attribute = private(Action::Read, &["tm1"])?;
        let granted = format!("public://{ALICE}/read/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(!check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_matches_exact_private_read() -> Result<()> {
        let attribute = private(Action::Read, &["tm1"])?;
        let granted = format!("private://{ALICE}/read/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_ignores_host_for_reads() -> Result<()> {
        let attribute = private(Action::Read, &["tm1"])?;
        let granted = format!("private://{BOB}/read/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_checks_host_for_writes() -> Result<()> {
        let attribute = private(Action::Write, &["tm1"])?;

        let granted = format!("private://{BOB}/write/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(!check(&attribute, &granted)?);

        let granted =
            format!("private://{ANY_ADDRESS}/write/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_uses_sender_as_host_for_writes_to_a_target() -> Result<()> {
        let attribute = ContractSecurityAttribute::builder()
            .private()
            .write()
            .from(ALICE.parse()?)
            .to(BOB.parse()?)
            .party("tm1")
            .build();

        let ask = PermissionUri::ask(&attribute)?;
        assert_eq!(ask.host(), ALICE);
        assert_eq!(ask.query().get(QUERY_OWNED_EOA), [BOB.to_string()]);

        let granted = format!("private://{BOB}/write/contracts?owned.eoa={BOB}&from.tm=tm1");
        assert!(!check(&attribute, &granted)?);

        let granted = format!("private://{ALICE}/write/contracts?owned.eoa={BOB}&from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_requires_exact_action_path() -> Result<()> {
        let attribute = private(Action::Create, &[])?;
        let attribute = ContractSecurityAttribute {
            private_from: "tm1".into(),
            ..attribute
        };

        let granted = format!("private://{ALICE}/write/contracts?from.tm=tm1");
        assert!(!check(&attribute, &granted)?);

        let granted = format!("private://{ALICE}/create/contracts?from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_accepts_internal_paths_for_any_action() -> Result<()> {
        let attribute = private(Action::Write, &["tm1"])?;
        let granted = format!("private://{ALICE}/_/contracts?owned.eoa={ALICE}&from.tm=tm1");
        assert!(check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_rejects_private_asks_without_parties() -> Result<()> {
        let attribute = private(Action::Read, &[])?;
        let granted = "private://0x0/_/contracts?owned.eoa=0x0&from.tm=tm1";
        assert!(!check(&attribute, granted)?);
        Ok(())
    }

    #[test]
    fn it_requires_owned_account_subset_for_reads() -> Result<()> {
        let attribute = private(Action::Read, &["tm1"])?;
        let granted = format!("private://{ALICE}/read/contracts?owned.eoa={BOB}&from.tm=tm1");
        assert!(!check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_requires_party_intersection_for_writes() -> Result<()> {
        let attribute = private(Action::Write, &["tm1", "tm2"])?;

        let granted = format!("private://{ALICE}/write/contracts?owned.eoa={ALICE}&from.tm=tm2");
        assert!(check(&attribute, &granted)?);

        let granted = format!("private://{ALICE}/write/contracts?owned.eoa={ALICE}&from.tm=tm3");
        assert!(!check(&attribute, &granted)?);
        Ok(())
    }

    #[test]
    fn it_requires_party_subset_for_create() -> Result<()> {
        let ask = Query::from_iter([(QUERY_FROM_TM, "tm1"), (QUERY_FROM_TM, "tm2")]);

        let granted = Query::from_iter([(QUERY_FROM_TM, "tm2")]);
        assert!(!matches_query(Action::Create, &ask, &granted));

        let granted = Query::from_iter([(QUERY_FROM_TM, "tm1"), (QUERY_FROM_TM, "tm2")]);
        assert!(matches_query(Action::Create, &ask, &granted));
        Ok(())
    }

    #[test]
    fn it_ignores_unknown_keys_for_reads_but_not_for_create() {
        let ask = Query::from_iter([(QUERY_FROM_TM, "tm1"), ("extra", "value")]);
        let granted = Query::from_iter([(QUERY_FROM_TM, "tm1")]);

        assert!(matches_query(Action::Read, &ask, &granted));
        assert!(!matches_query(Action::Create, &ask, &granted));
    }

    #[test]
    fn it_checks_to_account_subset_for_writes() {
        let ask = Query::from_iter([(QUERY_FROM_TM, "tm1"), (QUERY_TO_EOA, BOB)]);

        let granted = Query::from_iter([(QUERY_FROM_TM, "tm1"), (QUERY_TO_EOA, ALICE)]);
        assert!(!matches_query(Action::Write, &ask, &granted));

        let granted = Query::from_iter([(QUERY_FROM_TM, "tm1"), (QUERY_TO_EOA, ANY_ADDRESS)]);
        assert!(matches_query(Action::Write, &ask, &granted));
    }

    #[test]
    fn it_matches_host_and_path_rules() {
        assert!(matches_host(Action::Write, ALICE, ANY_ADDRESS));
        assert!(matches_host(Action::Read, ALICE, BOB));
        assert!(!matches_host(Action::Create, ALICE, BOB));
        assert!(matches_path("/read/contracts", "/_internal"));
        assert!(!matches_path("/read/contracts", "/write/contracts"));
    }

    fn address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>()
            .prop_filter("non-zero", |bytes| bytes.iter().any(|byte| *byte != 0))
            .prop_map(Address::new)
    }

    fn party() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9+/=]{1,12}"
    }

    fn mixed_case(value: &str, mask: u64) -> String {
        value
            .chars()
            .enumerate()
            .map(|(index, c)| {
                if index >= 2 && mask & (1 << (index % 64)) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn it_matches_identical_grants(
            from in address(),
            to in address(),
            parties in prop::collection::vec(party(), 1..4),
            action in prop_oneof![Just(Action::Read), Just(Action::Write)],
        ) {
            let attribute = ContractSecurityAttribute::builder()
                .private()
                .action(action)
                .from(from)
                .to(to)
                .parties(parties)
                .build();
            let ask = PermissionUri::ask(&attribute).unwrap();
            prop_assert!(matches(&attribute, &ask, &ask.clone()));
        }

        #[test]
        fn it_matches_mixed_case_addresses(
            from in address(),
            party in party(),
            mask in any::<u64>(),
            action in prop_oneof![Just(Action::Read), Just(Action::Write)],
        ) {
            let attribute = ContractSecurityAttribute::builder()
                .private()
                .action(action)
                .from(from)
                .party(party.clone())
                .build();
            let ask = PermissionUri::ask(&attribute).unwrap();

            let hex = mixed_case(&from.to_hex(), mask);
            let granted: PermissionUri = format!(
                "private://{hex}/{action}/contracts?owned.eoa={hex}&from.tm={}",
                url::form_urlencoded::byte_serialize(party.as_bytes()).collect::<String>()
            )
            .parse()
            .unwrap();
            prop_assert!(matches(&attribute, &ask, &granted));
        }

        #[test]
        fn it_matches_any_address_grants(
            from in address(),
            to in address(),
            party in party(),
        ) {
            let attribute = ContractSecurityAttribute::builder()
                .private()
                .write()
                .from(from)
                .to(to)
                .party(party.clone())
                .build();
            let ask = PermissionUri::ask(&attribute).unwrap();

            let mut query = Query::new();
            query.set(QUERY_OWNED_EOA, ANY_ADDRESS);
            query.set(QUERY_FROM_TM, party);
            let granted =
                PermissionUri::compose(Visibility::Private, ANY_ADDRESS, Action::Write, &query)
                    .unwrap();
            prop_assert!(matches(&attribute, &ask, &granted));
        }

        #[test]
        fn it_rejects_disjoint_parties(
            from in address(),
            asked in prop::collection::hash_set("[a-m]{1,6}", 1..4),
            granted in prop::collection::hash_set("[n-z]{1,6}", 1..4),
        ) {
            let attribute = ContractSecurityAttribute::builder()
                .private()
                .read()
                .from(from)
                .parties(asked)
                .build();
            let ask = PermissionUri::ask(&attribute).unwrap();

            let mut query =
                Query::from_iter(granted.into_iter().map(|party| (QUERY_FROM_TM, party)));
            query.set(QUERY_OWNED_EOA, ANY_ADDRESS);
            let granted =
                PermissionUri::compose(Visibility::Private, ANY_ADDRESS, Action::Read, &query)
                    .unwrap();
            prop_assert!(!matches(&attribute, &ask, &granted));
        }

        #[test]
        fn it_always_matches_public_asks(
            from in address(),
            action in prop_oneof![Just(Action::Read), Just(Action::Write), Just(Action::Create)],
        ) {
            let attribute = ContractSecurityAttribute::builder()
                .public()
                .action(action)
                .from(from)
                .build();
            let ask = PermissionUri::ask(&attribute).unwrap();
            let granted: PermissionUri = "private://0x1/read/contracts".parse().unwrap();
            prop_assert!(is_public(&ask));
            prop_assert!(matches(&attribute, &ask, &granted));
        }
    }
}
