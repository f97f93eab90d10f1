//! Tests for the valuation calculator and engine.

#[cfg(test)]
mod tests {
    use crate::assets::{Asset, NewAsset};
    use crate::diagnostics::{MockDiagnosticSink, ValuationWarning};
    use crate::errors::Error;
    use crate::fx::{FxRate, NewFxRate};
    use crate::portfolio::valuation::{
        calculate_total_value, evaluate_assets, EvaluatedAsset, ValuationConfig, ValuationEngine,
        ValuationRequest,
    };
    use crate::sample::{sample_assets, sample_fx_rates, sample_new_assets, sample_new_fx_rates};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valuation_date() -> NaiveDate {
        ymd(2023, 5, 15)
    }

    fn asset(name: &str, currency: &str, amount: Decimal) -> Asset {
        Asset::new(name, currency, amount, valuation_date()).unwrap()
    }

    fn rate(date: NaiveDate, currency: &str, value: Decimal) -> FxRate {
        FxRate::new(date, currency, value).unwrap()
    }

    fn engine_with_mock() -> (ValuationEngine, MockDiagnosticSink) {
        let sink = MockDiagnosticSink::new();
        let engine = ValuationEngine::default().with_diagnostic_sink(Arc::new(sink.clone()));
        (engine, sink)
    }

    fn names(evaluated: &[EvaluatedAsset]) -> Vec<&str> {
        evaluated.iter().map(|e| e.asset.name()).collect()
    }

    // --- Home currency ---

    #[test]
    fn test_home_currency_asset_valued_at_amount() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![asset("NYC Treasury", "USD", dec!(1000000.37))];
        // A USD "rate" must not be used for a home-currency asset
        let rates = vec![rate(ymd(2023, 5, 1), "USD", dec!(2))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(evaluated.len(), 1);
        assert_eq!(evaluated[0].home_value, dec!(1000000.37));
        assert!(evaluated[0].rate.is_none());
        assert_eq!(evaluated[0].rate_date(), None);
        assert!(!evaluated[0].stale);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_home_currency_needs_no_rates() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![asset("Cash", "usd", dec!(42))];
        let evaluated = engine.evaluate(&assets, &[], valuation_date());
        assert_eq!(evaluated[0].home_value, dec!(42));
        assert!(sink.is_empty());
    }

    // --- Rate selection ---

    #[test]
    fn test_latest_eligible_rate_is_used() {
        let (engine, _sink) = engine_with_mock();
        let assets = vec![asset("Berlin Bonds", "EUR", dec!(100))];
        let rates = vec![
            rate(ymd(2023, 5, 13), "EUR", dec!(1.10)),
            rate(ymd(2023, 5, 14), "EUR", dec!(1.20)),
            rate(ymd(2023, 5, 16), "EUR", dec!(9.99)),
        ];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(evaluated[0].home_value, dec!(120));
        assert_eq!(evaluated[0].rate_date(), Some(ymd(2023, 5, 14)));
    }

    #[test]
    fn test_asset_without_eligible_rate_is_excluded() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![
            asset("Zurich Flat", "CHF", dec!(800000)),
            asset("NYC Treasury", "USD", dec!(1000000)),
        ];
        // Only a future CHF rate exists
        let rates = vec![rate(ymd(2023, 5, 16), "CHF", dec!(1.11))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(names(&evaluated), vec!["NYC Treasury"]);
        assert_eq!(
            sink.warnings(),
            vec![ValuationWarning::missing_rate("Zurich Flat", "CHF")]
        );
    }

    #[test]
    fn test_missing_rate_does_not_stop_later_assets() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![
            asset("A", "CHF", dec!(1)),
            asset("B", "SEK", dec!(1)),
            asset("C", "GBP", dec!(10)),
        ];
        let rates = vec![rate(ymd(2023, 5, 15), "GBP", dec!(1.25))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(names(&evaluated), vec!["C"]);
        assert_eq!(evaluated[0].home_value, dec!(12.50));
        let currencies: Vec<String> = sink
            .warnings()
            .iter()
            .map(|w| w.currency().to_string())
            .collect();
        assert_eq!(currencies, vec!["CHF", "SEK"]);
    }

    // --- Staleness ---

    #[test]
    fn test_rate_exactly_three_days_old_is_fresh() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![asset("Tokyo Office", "JPY", dec!(1000))];
        let rates = vec![rate(ymd(2023, 5, 12), "JPY", dec!(0.0073))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert!(!evaluated[0].stale);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_rate_four_days_old_is_stale_but_used() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![asset("Berlin Bonds", "EUR", dec!(500000))];
        let rates = vec![rate(ymd(2023, 5, 11), "EUR", dec!(1.12))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(evaluated.len(), 1);
        assert!(evaluated[0].stale);
        assert_eq!(evaluated[0].home_value, dec!(560000));
        assert_eq!(
            sink.warnings(),
            vec![ValuationWarning::stale_rate(
                "Berlin Bonds",
                "EUR",
                ymd(2023, 5, 11),
                valuation_date()
            )]
        );
    }

    #[test]
    fn test_custom_threshold() {
        let sink = MockDiagnosticSink::new();
        let engine = ValuationEngine::new(ValuationConfig::new("USD", 0).unwrap())
            .unwrap()
            .with_diagnostic_sink(Arc::new(sink.clone()));
        let assets = vec![asset("London Stock", "GBP", dec!(250000))];
        let rates = vec![rate(ymd(2023, 5, 14), "GBP", dec!(1.25))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert!(evaluated[0].stale);
        assert_eq!(sink.len(), 1);
    }

    // --- Ordering and totals ---

    #[test]
    fn test_results_ordered_by_home_value_descending() {
        let (engine, _sink) = engine_with_mock();
        let assets = vec![
            asset("EUR asset", "EUR", dec!(500000)),
            asset("GBP asset", "GBP", dec!(250000)),
            asset("JPY asset", "JPY", dec!(150000000)),
            asset("USD asset", "USD", dec!(1000000)),
        ];
        let rates = vec![
            rate(ymd(2023, 5, 15), "EUR", dec!(1.12)),
            rate(ymd(2023, 5, 15), "GBP", dec!(1.25)),
            rate(ymd(2023, 5, 15), "JPY", dec!(0.0073)),
        ];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(
            names(&evaluated),
            vec!["JPY asset", "USD asset", "EUR asset", "GBP asset"]
        );
        let values: Vec<Decimal> = evaluated.iter().map(|e| e.home_value).collect();
        assert_eq!(
            values,
            vec![dec!(1095000), dec!(1000000), dec!(560000), dec!(312500)]
        );
    }

    #[test]
    fn test_equal_values_keep_input_order() {
        let (engine, _sink) = engine_with_mock();
        let assets = vec![
            asset("first", "USD", dec!(100)),
            asset("second", "EUR", dec!(50)),
            asset("third", "USD", dec!(100)),
        ];
        let rates = vec![rate(ymd(2023, 5, 15), "EUR", dec!(2))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(names(&evaluated), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(calculate_total_value(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_is_exact() {
        let (engine, _sink) = engine_with_mock();
        let assets = vec![
            asset("a", "USD", dec!(0.1)),
            asset("b", "USD", dec!(0.2)),
            asset("c", "EUR", dec!(0.3)),
        ];
        let rates = vec![rate(ymd(2023, 5, 15), "EUR", dec!(1.1))];

        let evaluated = engine.evaluate(&assets, &rates, valuation_date());

        assert_eq!(calculate_total_value(&evaluated).unwrap(), dec!(0.63));
    }

    // --- Overflow ---

    #[test]
    fn test_conversion_overflow_excludes_asset() {
        let (engine, sink) = engine_with_mock();
        let assets = vec![
            asset("Big", "EUR", Decimal::MAX),
            asset("London Stock", "GBP", dec!(250000)),
        ];
        let rates = vec![
            rate(ymd(2023, 5, 10), "EUR", dec!(2)),
            rate(ymd(2023, 5, 14), "GBP", dec!(1.25)),
        ];

        let report = engine.value(&assets, &rates, valuation_date()).unwrap();

        assert_eq!(names(&report.assets), vec!["London Stock"]);
        assert_eq!(report.total_value, dec!(312500));
        assert_eq!(report.excluded_count(), 1);
        // No stale warning for an asset that was never valued
        assert_eq!(
            sink.warnings(),
            vec![ValuationWarning::value_overflow("Big", "EUR")]
        );
    }

    #[test]
    fn test_total_overflow_is_calculation_error() {
        let (engine, _sink) = engine_with_mock();
        let assets = vec![
            asset("Big 1", "USD", Decimal::MAX),
            asset("Big 2", "USD", Decimal::MAX),
        ];

        let evaluated = engine.evaluate(&assets, &[], valuation_date());
        assert_eq!(evaluated.len(), 2);
        assert!(matches!(
            calculate_total_value(&evaluated),
            Err(Error::Calculation(_))
        ));
        assert!(matches!(
            engine.value(&assets, &[], valuation_date()),
            Err(Error::Calculation(_))
        ));
    }

    // --- End to end ---

    #[test]
    fn test_sample_portfolio_end_to_end() {
        let (engine, sink) = engine_with_mock();
        let assets = sample_assets(valuation_date()).unwrap();
        let rates = sample_fx_rates().unwrap();

        let report = engine.value(&assets, &rates, valuation_date()).unwrap();

        assert_eq!(
            names(&report.assets),
            vec!["Tokyo Office", "NYC Treasury", "Berlin Bonds", "London Stock"]
        );
        let values: Vec<Decimal> = report.assets.iter().map(|e| e.home_value).collect();
        assert_eq!(
            values,
            vec![dec!(1095000.00), dec!(1000000.00), dec!(560000.00), dec!(312500.00)]
        );
        assert_eq!(report.total_value, dec!(2967500.00));
        assert_eq!(report.home_currency, "USD");

        // Tokyo is 3 days old (fresh), Berlin is 4 days old (stale)
        let stale: Vec<&str> = report
            .assets
            .iter()
            .filter(|e| e.stale)
            .map(|e| e.asset.name())
            .collect();
        assert_eq!(stale, vec!["Berlin Bonds"]);
        assert_eq!(report.stale_count(), 1);
        assert_eq!(report.excluded_count(), 0);

        assert_eq!(report.assets[0].rate_date(), Some(ymd(2023, 5, 12)));
        assert_eq!(report.assets[2].rate_date(), Some(ymd(2023, 5, 11)));
        assert_eq!(report.assets[3].rate_date(), Some(ymd(2023, 5, 14)));

        // Report warnings mirror what the sink received
        assert_eq!(report.warnings, sink.warnings());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_evaluate_assets_with_alternate_home_currency() {
        let sink = MockDiagnosticSink::new();
        let config = ValuationConfig::new("eur", 3).unwrap();
        let assets = vec![
            asset("Berlin Bonds", "EUR", dec!(500000)),
            asset("NYC Treasury", "USD", dec!(1000)),
        ];
        let rates = vec![rate(ymd(2023, 5, 15), "USD", dec!(0.9))];

        let evaluated = evaluate_assets(&assets, &rates, valuation_date(), &config, &sink);

        assert_eq!(evaluated[0].home_value, dec!(500000));
        assert!(evaluated[0].rate.is_none());
        assert_eq!(evaluated[1].home_value, dec!(900));
        assert!(sink.is_empty());
    }

    // --- Requests ---

    #[test]
    fn test_request_without_assets_is_invalid_argument() {
        let engine = ValuationEngine::default();
        let request = ValuationRequest {
            valuation_date: Some(valuation_date()),
            assets: None,
            fx_rates: Some(sample_new_fx_rates()),
        };
        assert!(matches!(
            engine.evaluate_request(&request),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_without_fx_rates_is_invalid_argument() {
        let engine = ValuationEngine::default();
        let request = ValuationRequest {
            valuation_date: Some(valuation_date()),
            assets: Some(sample_new_assets()),
            fx_rates: None,
        };
        assert!(matches!(
            engine.value_request(&request),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_with_empty_collections_is_valid() {
        let engine = ValuationEngine::default();
        let request = ValuationRequest::new(vec![], vec![], valuation_date());
        let report = engine.value_request(&request).unwrap();
        assert!(report.assets.is_empty());
        assert_eq!(report.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_request_from_json() {
        let (engine, sink) = engine_with_mock();
        let json = r#"{
            "valuationDate": "2023-05-15T16:30:00",
            "assets": [
                {"name": "Berlin Bonds", "currency": "eur", "amount": "500000"},
                {"name": "Zurich Flat", "currency": "CHF", "amount": 800000}
            ],
            "fxRates": [
                {"date": "2023-05-11", "currency": "EUR", "rate": "1.12"}
            ]
        }"#;
        let request: ValuationRequest = serde_json::from_str(json).unwrap();

        let report = engine.value_request(&request).unwrap();

        assert_eq!(report.valuation_date, valuation_date());
        assert_eq!(names(&report.assets), vec!["Berlin Bonds"]);
        assert_eq!(report.total_value, dec!(560000));
        assert_eq!(report.excluded_count(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_request_default_date_does_not_override() {
        let request = ValuationRequest {
            valuation_date: Some(valuation_date()),
            assets: Some(vec![]),
            fx_rates: Some(vec![]),
        }
        .with_default_date(ymd(2024, 1, 1));
        assert_eq!(request.valuation_date, Some(valuation_date()));

        let request = ValuationRequest {
            valuation_date: None,
            assets: Some(vec![NewAsset {
                name: "Cash".to_string(),
                currency: "USD".to_string(),
                amount: dec!(5),
                valuation_date: None,
            }]),
            fx_rates: Some(vec![NewFxRate {
                date: ymd(2023, 12, 29),
                currency: "EUR".to_string(),
                rate: dec!(1.1),
            }]),
        }
        .with_default_date(ymd(2024, 1, 1));
        let inputs = request.resolve().unwrap();
        assert_eq!(inputs.valuation_date, ymd(2024, 1, 1));
        assert_eq!(inputs.assets[0].valuation_date(), ymd(2024, 1, 1));
    }

    #[test]
    fn test_request_with_invalid_record_fails_validation() {
        let request = ValuationRequest::new(
            vec![NewAsset {
                name: "Bad".to_string(),
                currency: "XX".to_string(),
                amount: dec!(1),
                valuation_date: None,
            }],
            vec![],
            valuation_date(),
        );
        assert!(matches!(request.resolve(), Err(Error::Validation(_))));
    }

    // --- Config ---

    #[test]
    fn test_default_config() {
        let config = ValuationConfig::default();
        assert_eq!(config.home_currency, "USD");
        assert_eq!(config.stale_rate_days, 3);
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(ValuationConfig::new(" gbp ", 5).unwrap().home_currency, "GBP");
        assert!(ValuationConfig::new("POUND", 5).is_err());
        assert!(ValuationConfig::new("GBP", -1).is_err());
        assert!(ValuationEngine::new(ValuationConfig {
            home_currency: "X".to_string(),
            stale_rate_days: 3,
        })
        .is_err());
    }

    #[test]
    fn test_report_json() {
        let engine = ValuationEngine::default();
        let assets = sample_assets(valuation_date()).unwrap();
        let rates = sample_fx_rates().unwrap();
        let report = engine.value(&assets, &rates, valuation_date()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valuationDate"], "2023-05-15");
        assert_eq!(json["homeCurrency"], "USD");
        assert_eq!(json["totalValue"], "2967500");
        assert_eq!(json["assets"][0]["asset"]["name"], "Tokyo Office");
        assert_eq!(json["assets"][0]["rate"]["date"], "2023-05-12");
        assert!(json["assets"][1]["rate"].is_null());
        assert_eq!(json["warnings"][0]["kind"], "staleRate");
    }
}
