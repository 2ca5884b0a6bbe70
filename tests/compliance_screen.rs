use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tharwa::prelude::*;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn equity(name: &str, ticker: &str, screening: ScreeningProfile) -> Equity {
    Equity::new(name, ticker, "NYSE", date(2024, 1, 2), dec!(10), dec!(50))
        .unwrap()
        .with_screening(screening)
}

#[test]
fn default_profile_passes_every_rule() {
    let screen = ComplianceScreen::new();
    let asset: Asset = equity("Utility co", "UTL", ScreeningProfile::default()).into();
    assert!(screen.check_compliance(&asset));
    assert!(screen.violations(&asset).is_empty());
}

#[test]
fn each_rule_is_detected_independently() {
    let screen = ComplianceScreen::new();

    let interest: Asset = equity(
        "Bond fund",
        "BND",
        ScreeningProfile::new(true, false, dec!(0), dec!(0)).unwrap(),
    )
    .into();
    assert_eq!(screen.violations(&interest), vec![ComplianceRule::InterestBearing]);

    let prohibited: Asset = equity(
        "Casino",
        "CSN",
        ScreeningProfile::new(false, true, dec!(0), dec!(0)).unwrap(),
    )
    .into();
    assert_eq!(screen.violations(&prohibited), vec![ComplianceRule::ProhibitedActivity]);

    // Debt ratio above 33%.
    let leveraged: Asset = equity(
        "Leveraged co",
        "LEV",
        ScreeningProfile::new(false, false, dec!(0.34), dec!(0)).unwrap(),
    )
    .into();
    assert_eq!(screen.violations(&leveraged), vec![ComplianceRule::ExcessiveDebt]);

    // Impermissible income above 5%.
    let mixed: Asset = equity(
        "Mixed revenue co",
        "MIX",
        ScreeningProfile::new(false, false, dec!(0), dec!(0.06)).unwrap(),
    )
    .into();
    assert_eq!(screen.violations(&mixed), vec![ComplianceRule::ImpermissibleIncome]);
}

#[test]
fn limits_are_inclusive() {
    let screen = ComplianceScreen::new();
    let borderline: Asset = equity(
        "Borderline co",
        "BDL",
        ScreeningProfile::new(false, false, dec!(0.33), dec!(0.05)).unwrap(),
    )
    .into();
    assert!(screen.check_compliance(&borderline));
}

#[test]
fn portfolio_compliance_is_the_and_over_assets() {
    let screen = ComplianceScreen::new();
    let mut portfolio = Portfolio::new(Uuid::new_v4());
    portfolio.add_asset(equity("Clean co", "CLN", ScreeningProfile::default()));
    portfolio.add_asset(
        PreciousMetal::new(
            "Gold",
            MetalKind::Gold,
            date(2023, 1, 1),
            dec!(4000),
            dec!(80),
            dec!(0.995),
        )
        .unwrap(),
    );

    let snapshot = portfolio.snapshot();
    assert!(screen.is_compliant(&snapshot));
    assert!(screen.filter_non_compliant(&snapshot).is_empty());

    // One bad apple flips the portfolio verdict.
    portfolio.add_asset(equity(
        "Brewery",
        "BRW",
        ScreeningProfile::new(false, true, dec!(0.5), dec!(0.4)).unwrap(),
    ));
    let snapshot = portfolio.snapshot();
    assert!(!screen.is_compliant(&snapshot));

    let failing = screen.filter_non_compliant(&snapshot);
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].name(), "Brewery");

    let report = screen.screen(&snapshot);
    assert!(!report.is_compliant());
    let non_compliant = report.non_compliant();
    assert_eq!(non_compliant.len(), 1);
    // The brewery fails three rules at once.
    assert_eq!(non_compliant[0].violations.len(), 3);
}
