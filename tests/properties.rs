// tests/properties.rs

use proptest::prelude::*;

use ansible_exec::errors::AnsibleError;
use ansible_exec::types::ModuleArgs;
use ansible_exec::{format_args, AdHoc, AnsibleCommand, CommonOptions};

fn token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn adhoc_validation_names_every_missing_field(
        hosts in proptest::option::of(token()),
        module in proptest::option::of(token()),
        forks in proptest::option::of(1u32..100),
        user in proptest::option::of(token()),
    ) {
        let mut cmd = AdHoc::new();
        if let Some(h) = &hosts {
            cmd = cmd.hosts(h);
        }
        if let Some(m) = &module {
            cmd = cmd.module(m);
        }
        if let Some(f) = forks {
            cmd = cmd.forks(f);
        }
        if let Some(u) = &user {
            cmd = cmd.user(u);
        }

        match cmd.validate() {
            Ok(()) => prop_assert!(hosts.is_some() && module.is_some()),
            Err(AnsibleError::Validation(msg)) => {
                prop_assert_eq!(msg.contains("\"hosts\""), hosts.is_none());
                prop_assert_eq!(msg.contains("\"module\""), module.is_none());
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn adhoc_vector_starts_with_hosts_and_module(
        hosts in token(),
        module in token(),
        limit in proptest::option::of(token()),
    ) {
        let mut cmd = AdHoc::new().hosts(&hosts).module(&module);
        if let Some(l) = &limit {
            cmd = cmd.limit(l);
        }

        let params = cmd.compile_params();
        prop_assert_eq!(&params[..3], &[hosts.clone(), "-m".to_string(), module.clone()][..]);
        prop_assert_eq!(params.len(), if limit.is_some() { 5 } else { 3 });
    }

    #[test]
    fn formatter_emits_freeform_then_every_pair(
        pairs in proptest::collection::vec((token(), token()), 0..5),
        freeform in proptest::option::of(token()),
    ) {
        let args: ModuleArgs = pairs.into_iter().collect();
        let formatted = format_args(Some(&args), freeform.as_deref());

        if args.is_empty() && freeform.is_none() {
            prop_assert_eq!(formatted, None);
        } else {
            let formatted = formatted.unwrap();
            let mut tokens = formatted.split(' ');
            if let Some(f) = &freeform {
                prop_assert_eq!(tokens.next(), Some(f.as_str()));
            }
            let rest: Vec<String> = tokens.map(str::to_string).collect();
            let expected: Vec<String> = args.iter().map(|(k, v)| format!("{k}={v}")).collect();
            prop_assert_eq!(rest, expected);
        }
    }
}
