use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strum::IntoEnumIterator;
use tharwa::prelude::*;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn oracle() -> StaticPriceOracle {
    StaticPriceOracle::new()
        .with_price("AAPL", dec!(150))
        .unwrap()
        .with_price("XAU", dec!(60))
        .unwrap()
        .with_price("BTC", dec!(40000))
        .unwrap()
}

fn mixed_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new(Uuid::new_v4());
    // 20 AAPL @ $150 quote -> $3,000
    portfolio.add_asset(
        Equity::new("Apple", "AAPL", "NASDAQ", date(2024, 1, 2), dec!(20), dec!(140)).unwrap(),
    );
    // 50g gold at 0.9 purity, $60/g -> $2,700
    portfolio.add_asset(
        PreciousMetal::new(
            "Gold coins",
            MetalKind::Gold,
            date(2023, 8, 1),
            dec!(2500),
            dec!(50),
            dec!(0.9),
        )
        .unwrap(),
    );
    // Vacant 100 m2 residential -> $150,000 analytic
    portfolio.add_asset(
        Property::new(
            "Flat",
            "Jeddah",
            PropertyType::Residential,
            date(2021, 5, 1),
            dec!(140000),
            dec!(100),
        )
        .unwrap(),
    );
    // 0.1 BTC -> $4,000
    portfolio.add_asset(
        Coin::new("BTC", CoinKind::Bitcoin, date(2023, 1, 1), dec!(2000), dec!(0.1)).unwrap(),
    );
    portfolio
}

#[test]
fn net_worth_sums_all_four_kinds() {
    let oracle = oracle();
    let portfolio = mixed_portfolio();
    // 3000 + 2700 + 150000 + 4000 = 159,700
    assert_eq!(portfolio.net_worth(&oracle).unwrap(), dec!(159700));
}

#[test]
fn net_worth_stays_consistent_through_add_remove_interleavings() {
    let oracle = oracle();
    let mut portfolio = mixed_portfolio();

    // Remove the property, add another coin, remove the equity.
    let ids: Vec<Uuid> = portfolio
        .snapshot()
        .assets()
        .iter()
        .map(|a| a.id())
        .collect();
    portfolio.remove_asset(&ids[2]).unwrap();
    portfolio.add_asset(
        Coin::new("More BTC", CoinKind::Bitcoin, date(2024, 2, 1), dec!(4000), dec!(0.05)).unwrap(),
    );
    portfolio.remove_asset(&ids[0]).unwrap();

    // 2700 + 4000 + 2000 = 8,700: and it equals the snapshot sum.
    let snapshot = portfolio.snapshot();
    let manual: Decimal = snapshot
        .assets()
        .iter()
        .map(|a| a.current_value(&oracle).unwrap())
        .sum();
    assert_eq!(portfolio.net_worth(&oracle).unwrap(), dec!(8700));
    assert_eq!(portfolio.net_worth(&oracle).unwrap(), manual);
}

#[test]
fn distribution_shares_sum_to_one_within_rounding() {
    let oracle = oracle();
    let portfolio = mixed_portfolio();
    let dist = portfolio.asset_distribution(&oracle).unwrap();

    // The portfolio holds every kind, so every kind gets a share.
    for kind in AssetKind::iter() {
        assert!(dist.contains_key(&kind), "no share for {}", kind);
    }
    assert_eq!(dist.len(), 4);
    let total: Decimal = dist.values().copied().sum();
    assert!((total - Decimal::ONE).abs() <= dec!(0.0002), "shares sum to {}", total);

    // Property dominates: 150000 / 159700 ≈ 0.9393.
    assert_eq!(dist[&AssetKind::Property], dec!(0.9393));
}

#[test]
fn snapshot_is_isolated_from_later_mutation() {
    let oracle = oracle();
    let mut portfolio = mixed_portfolio();
    let snapshot = portfolio.snapshot();

    let first_id = snapshot.assets()[0].id();
    portfolio.remove_asset(&first_id).unwrap();

    // The snapshot still values the removed asset; the live portfolio no
    // longer does.
    assert_eq!(snapshot.net_worth(&oracle).unwrap(), dec!(159700));
    assert_eq!(portfolio.net_worth(&oracle).unwrap(), dec!(156700));
}

#[test]
fn mutating_via_the_portfolio_reprices_immediately() {
    let oracle = oracle();
    let mut portfolio = Portfolio::new(Uuid::new_v4());
    portfolio.add_asset(
        Equity::new("Apple", "AAPL", "NASDAQ", date(2024, 1, 2), dec!(10), dec!(140)).unwrap(),
    );
    let id = portfolio.snapshot().assets()[0].id();

    match portfolio.asset_mut(&id).unwrap() {
        Asset::Equity(equity) => {
            equity.buy_shares(date(2024, 2, 1), dec!(10), dec!(145)).unwrap();
        }
        _ => unreachable!(),
    }

    // 20 shares * $150 = $3,000, reflected on the very next read.
    assert_eq!(portfolio.net_worth(&oracle).unwrap(), dec!(3000));
}
