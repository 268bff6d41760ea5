//! Integration tests for intent construction and unit conversion.
//!
//! The contract rejects or misbehaves on any argument-order mistake, so
//! these tests pin the exact target strings, argument order, and encodings
//! for every entry point, plus the MIST conversion edge cases.

use suimarket_app::{intent, CallArg, Error};
use suimarket_types::{parse_sui, to_sui_string, Listing, NftSnapshot, ObjectId, SuiAddress, MIST_PER_SUI};

use crate::utils::test_config;

fn listing(seller: &str, price: u64) -> Listing {
    Listing {
        object_id: ObjectId::new("0xlisting"),
        seller: SuiAddress::new(seller),
        price,
        nft: NftSnapshot {
            name: "Card".into(),
            description: "desc".into(),
            image_url: "http://x".into(),
        },
    }
}

#[test]
fn test_every_target_hits_the_configured_module() {
    let cfg = test_config();
    let nft = ObjectId::new("0xnft");
    let admin = SuiAddress::new("0xadmin");

    let targets = [
        intent::mint_nft(&cfg, "n", "d", "u").unwrap().target,
        intent::list_nft(&cfg, &nft, "1").unwrap().target,
        intent::buy_nft(&cfg, &listing("0xseller", 1), &admin).unwrap().target,
        intent::cancel_listing(&cfg, &listing("0xadmin", 1), &admin).unwrap().target,
        intent::burn_nft(&cfg, &nft).target,
        intent::update_description(&cfg, &nft, "d").unwrap().target,
        intent::withdraw_fees(&cfg, &admin, "1", MIST_PER_SUI).unwrap().target,
    ];

    for target in &targets {
        assert!(
            target.starts_with("0xpkg::nft_marketplace::"),
            "unexpected target {target}"
        );
    }
}

#[test]
fn test_buy_splits_payment_from_gas_for_exact_price() {
    let cfg = test_config();
    let l = listing("0xseller", 2_500_000_000);
    let intent = intent::buy_nft(&cfg, &l, &SuiAddress::new("0xbuyer")).unwrap();

    assert_eq!(
        intent.args,
        vec![
            CallArg::Object(ObjectId::new("0xlisting")),
            CallArg::SplitFromGas(2_500_000_000),
            CallArg::Object(ObjectId::new("0xmarket")),
        ]
    );
}

#[test]
fn test_mint_with_empty_description_rejected_before_building() {
    let cfg = test_config();
    let err = intent::mint_nft(&cfg, "Card", "", "http://x").unwrap_err();
    match err {
        Error::Validation(message) => assert_eq!(message, "Description is required"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_list_price_boundary() {
    let cfg = test_config();
    let nft = ObjectId::new("0xnft");

    // 1 MIST after scaling: the smallest representable price.
    let intent = intent::list_nft(&cfg, &nft, "0.000000001").unwrap();
    assert!(intent.args.contains(&CallArg::PureU64(1)));

    assert!(intent::list_nft(&cfg, &nft, "0").is_err());
    assert!(intent::list_nft(&cfg, &nft, "0.0000000001").is_err()); // truncates to 0
}

#[test]
fn test_withdraw_balance_and_role_guards() {
    let cfg = test_config();
    let admin = SuiAddress::new("0xADMIN"); // admin identity is case-insensitive
    let stranger = SuiAddress::new("0xstranger");

    assert!(intent::withdraw_fees(&cfg, &stranger, "1", u64::MAX).is_err());
    assert!(intent::withdraw_fees(&cfg, &admin, "0", u64::MAX).is_err());
    assert!(intent::withdraw_fees(&cfg, &admin, "-3", u64::MAX).is_err());
    assert!(intent::withdraw_fees(&cfg, &admin, "1.000000001", MIST_PER_SUI).is_err());

    let intent = intent::withdraw_fees(&cfg, &admin, "1", MIST_PER_SUI).unwrap();
    assert_eq!(
        intent.args,
        vec![
            CallArg::Object(ObjectId::new("0xmarket")),
            CallArg::PureU64(MIST_PER_SUI),
            CallArg::PureAddress(admin),
        ]
    );
}

#[test]
fn test_mist_round_trip_on_integer_path() {
    for mist in [1u64, 999, MIST_PER_SUI - 1, MIST_PER_SUI, 123 * MIST_PER_SUI + 456] {
        let rendered = to_sui_string(mist);
        assert_eq!(parse_sui(&rendered), Ok(mist), "via {rendered}");
    }
}
