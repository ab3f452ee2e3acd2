#[cfg(test)]
mod tests {
    use crate::cash_flows::{
        BankTransactionMapping, CashFlowClassifier, ClassificationConfig,
        CollectingUnrecognizedTypeSink, FallbackPolicy, FlowCategory, TypeExtraction,
    };
    use crate::errors::Error;
    use crate::transactions::Transaction;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::sync::Arc;

    fn create_test_transaction(bank: &str, transaction_type: &str, amount: Decimal) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            transaction_type,
            amount,
            bank,
            "ACC-001",
        )
    }

    fn classifier() -> CashFlowClassifier {
        CashFlowClassifier::with_defaults().unwrap()
    }

    // --- Per-bank lookup ---

    #[test]
    fn test_bank_inflow_is_positive() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("HSBC", "Deposit", dec!(-2500)));
        assert_eq!(result.category, FlowCategory::ExternalInflow);
        assert_eq!(result.amount, dec!(2500));
        assert!(result.is_excluded());
        assert!(result.is_external_flow());
    }

    #[test]
    fn test_bank_outflow_is_negative() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("HSBC", "Withdrawal", dec!(1000)));
        assert_eq!(result.category, FlowCategory::ExternalOutflow);
        assert_eq!(result.amount, dec!(-1000));
    }

    #[test]
    fn test_trading_is_excluded_without_flow_amount() {
        let c = classifier();
        let tx = create_test_transaction("JPM", "Purchase", dec!(-50000));
        let result = c.classify(&tx);
        assert_eq!(result.category, FlowCategory::Trading);
        assert_eq!(result.amount, Decimal::ZERO);
        assert!(c.is_excluded(&tx));
        assert_eq!(c.cash_flow_amount(&tx), Decimal::ZERO);
    }

    #[test]
    fn test_problematic_is_excluded() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("MS", "Return of Principal", dec!(100)));
        assert_eq!(result.category, FlowCategory::Problematic);
        assert!(result.is_excluded());
        assert!(!result.is_external_flow());
    }

    #[test]
    fn test_unmatched_type_is_investment_performance() {
        let c = classifier();
        let tx = create_test_transaction("JPM", "Cash Dividend", dec!(120.50));
        let result = c.classify(&tx);
        assert_eq!(result.category, FlowCategory::InvestmentPerformance);
        assert!(!c.is_excluded(&tx));
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_type_matching_is_case_insensitive() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("HSBC", "wire transfer CREDIT", dec!(10)));
        assert_eq!(result.category, FlowCategory::ExternalInflow);

        let result = c.classify(&create_test_transaction("VALLEY", "Wire Out Intl", dec!(10)));
        assert_eq!(result.category, FlowCategory::ExternalOutflow);
    }

    #[test]
    fn test_bank_code_is_normalized() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("  hsbc ", "Withdrawal", dec!(10)));
        assert_eq!(result.bank, "HSBC");
        assert_eq!(result.category, FlowCategory::ExternalOutflow);
    }

    #[test]
    fn test_type_in_both_directions_uses_sign() {
        let c = classifier();
        let incoming = c.classify(&create_test_transaction(
            "CS",
            "Cross Border Credit Transfer",
            dec!(7500),
        ));
        assert_eq!(incoming.category, FlowCategory::ExternalInflow);
        assert_eq!(incoming.amount, dec!(7500));

        let outgoing = c.classify(&create_test_transaction(
            "CS",
            "Cross Border Credit Transfer",
            dec!(-7500),
        ));
        assert_eq!(outgoing.category, FlowCategory::ExternalOutflow);
        assert_eq!(outgoing.amount, dec!(-7500));
    }

    // --- Empty types ---

    #[test]
    fn test_empty_type_is_problematic() {
        let c = classifier();
        for raw in ["", "   ", "\n"] {
            let result = c.classify(&create_test_transaction("JPM", raw, dec!(500)));
            assert_eq!(result.category, FlowCategory::Problematic, "type {:?}", raw);
            assert_eq!(result.amount, Decimal::ZERO);
        }
    }

    // --- Type extraction ---

    #[test]
    fn test_cs_uses_first_line() {
        let c = classifier();
        let tx = create_test_transaction(
            "CS",
            "Wire Transfer In\nOrdering party: J. Doe\nRef 0042",
            dec!(20000),
        );
        let result = c.classify(&tx);
        assert_eq!(result.transaction_type, "Wire Transfer In");
        assert_eq!(result.category, FlowCategory::ExternalInflow);
    }

    #[test]
    fn test_cs_leading_blank_lines_are_skipped() {
        let c = classifier();
        let tx = create_test_transaction("CS", "\nWire Transfer In\nRef 123", dec!(5000));
        let result = c.classify(&tx);
        assert_eq!(result.transaction_type, "Wire Transfer In");
        assert_eq!(result.category, FlowCategory::ExternalInflow);
        assert_eq!(result.amount, dec!(5000));
    }

    #[test]
    fn test_idb_prefix_patterns() {
        let c = classifier();
        let result = c.classify(&create_test_transaction(
            "IDB",
            "BILL PMT AMEX 3004 REF 88",
            dec!(-1200),
        ));
        assert_eq!(result.transaction_type, "BILL PMT");
        assert_eq!(result.category, FlowCategory::ExternalOutflow);
        assert_eq!(result.amount, dec!(-1200));

        let fee = c.classify(&create_test_transaction(
            "IDB",
            "Annual Maintenance Fee 2024",
            dec!(-250),
        ));
        assert_eq!(fee.transaction_type, "Annual Maintenance Fee");
        assert_eq!(fee.category, FlowCategory::InvestmentPerformance);
    }

    #[test]
    fn test_pershing_parvalue_patterns() {
        let c = classifier();
        let result = c.classify(&create_test_transaction(
            "Pershing",
            "Buy 100,000 Parvalue Of 912828YK0 At 98.75",
            dec!(-98750),
        ));
        assert_eq!(result.transaction_type, "Buy");
        assert_eq!(result.category, FlowCategory::Trading);
    }

    #[test]
    fn test_extract_transaction_type_for_plain_bank() {
        let c = classifier();
        assert_eq!(
            c.extract_transaction_type("HSBC", "  Wire Out \nsecond line"),
            "Wire Out \nsecond line".trim()
        );
    }

    // --- Fallback ---

    #[test]
    fn test_unknown_bank_uses_global_table() {
        let c = classifier();
        let deposit = c.classify(&create_test_transaction("NEWBANK", "deposit", dec!(300)));
        assert_eq!(deposit.category, FlowCategory::ExternalInflow);

        let rescate = c.classify(&create_test_transaction("NEWBANK", "Rescate", dec!(300)));
        assert_eq!(rescate.category, FlowCategory::ExternalOutflow);
        assert_eq!(rescate.amount, dec!(-300));

        let subscription = c.classify(&create_test_transaction("NEWBANK", "Subscription", dec!(1)));
        assert_eq!(subscription.category, FlowCategory::Problematic);

        let dividend = c.classify(&create_test_transaction("NEWBANK", "Dividend", dec!(30)));
        assert_eq!(dividend.category, FlowCategory::InvestmentPerformance);
    }

    #[test]
    fn test_missing_bank_is_unknown() {
        let c = classifier();
        let result = c.classify(&create_test_transaction("", "Wire Transfer In", dec!(5)));
        assert_eq!(result.bank, "UNKNOWN");
        assert_eq!(result.category, FlowCategory::ExternalInflow);
    }

    #[test]
    fn test_known_bank_does_not_fall_back_by_default() {
        let c = classifier();
        // "Journal" is a global outflow but not in the HSBC table.
        let result = c.classify(&create_test_transaction("HSBC", "Journal", dec!(-10)));
        assert_eq!(result.category, FlowCategory::InvestmentPerformance);
    }

    #[test]
    fn test_always_fallback_policy() {
        let config = ClassificationConfig::default().with_fallback_policy(FallbackPolicy::Always);
        let c = CashFlowClassifier::new(config).unwrap();

        let result = c.classify(&create_test_transaction("HSBC", "Journal", dec!(-10)));
        assert_eq!(result.category, FlowCategory::ExternalOutflow);

        // Explicit inclusion stops the fallback.
        let result = c.classify(&create_test_transaction("ALT", "Distribution", dec!(10)));
        assert_eq!(result.category, FlowCategory::InvestmentPerformance);
    }

    // --- ALT ---

    #[test]
    fn test_alt_purchase_is_trading_and_sale_is_included() {
        let c = classifier();
        let purchase = c.classify(&create_test_transaction("ALT", "Purchase", dec!(-100000)));
        assert_eq!(purchase.category, FlowCategory::Trading);
        assert_eq!(purchase.amount, Decimal::ZERO);

        let sale = c.classify(&create_test_transaction("ALT", "Sale", dec!(40000)));
        assert_eq!(sale.category, FlowCategory::InvestmentPerformance);
    }

    // --- Unrecognized type sink ---

    #[test]
    fn test_sink_records_only_unknown_included_types() {
        let sink = Arc::new(CollectingUnrecognizedTypeSink::new());
        let c = classifier().with_sink(sink.clone());

        c.classify(&create_test_transaction("JPM", "Mystery Credit", dec!(10)));
        c.classify(&create_test_transaction("JPM", "cash dividend", dec!(10)));
        c.classify(&create_test_transaction("JPM", "Purchase", dec!(10)));
        c.classify(&create_test_transaction("ALT", "Income", dec!(10)));
        c.classify(&create_test_transaction("JPM", "", dec!(10)));

        assert_eq!(
            sink.entries(),
            vec![("JPM".to_string(), "Mystery Credit".to_string())]
        );
    }

    #[test]
    fn test_sink_does_not_change_classification() {
        let sink = Arc::new(CollectingUnrecognizedTypeSink::new());
        let with_sink = classifier().with_sink(sink.clone());
        let without_sink = classifier();

        let tx = create_test_transaction("CSC", "Odd Adjustment", dec!(-42));
        assert_eq!(with_sink.classify(&tx), without_sink.classify(&tx));
        assert_eq!(sink.len(), 1);
    }

    // --- Batch helpers ---

    #[test]
    fn test_partition_groups_by_category() {
        let c = classifier();
        let transactions = vec![
            create_test_transaction("HSBC", "Deposit", dec!(1000)),
            create_test_transaction("HSBC", "Withdrawal", dec!(400)),
            create_test_transaction("HSBC", "Purchase", dec!(-600)),
            create_test_transaction("JPM", "UNKNOWN", dec!(5)),
            create_test_transaction("JPM", "Interest", dec!(12)),
        ];

        let grouped = c.partition(&transactions);
        assert_eq!(grouped.external_flows.len(), 2);
        assert_eq!(grouped.trading.len(), 1);
        assert_eq!(grouped.problematic.len(), 1);
        assert_eq!(grouped.investment.len(), 1);
        assert_eq!(grouped.excluded_count(), 4);
        assert_eq!(grouped.len(), 5);
        assert_eq!(grouped.net_external_flows(), dec!(600));
        assert_eq!(grouped.external_flows[0].transaction.transaction_type, "Deposit");
    }

    #[test]
    fn test_supported_banks_and_mapping_lookup() {
        let c = classifier();
        let banks = c.supported_banks();
        assert!(banks.contains(&"ALT"));
        assert!(banks.contains(&"PERSHING"));
        assert!(banks.windows(2).all(|w| w[0] <= w[1]));

        let mapping = c.mapping_for("pershing").unwrap();
        assert!(mapping.trading_excluded.contains(&"Security Redeemed".to_string()));
        assert!(c.mapping_for("NEWBANK").is_none());

        assert!(c.excluded_types().outflows.contains(&"Rescate".to_string()));
    }

    // --- Configuration ---

    #[test]
    fn test_fixture_config_replaces_tables() {
        let json = r#"{
            "banks": {
                "Acme": { "externalInflows": ["Top Up"], "tradingExcluded": ["Swap"] }
            },
            "global": { "inflows": [], "outflows": ["Payout"], "problematic": [] },
            "typeExtraction": {},
            "knownInvestmentTypes": ["Coupon"]
        }"#;
        let c = CashFlowClassifier::new(ClassificationConfig::from_json_str(json).unwrap()).unwrap();

        assert_eq!(c.supported_banks(), vec!["ACME"]);
        assert_eq!(
            c.classify(&create_test_transaction("acme", "top up", dec!(9))).category,
            FlowCategory::ExternalInflow
        );
        assert_eq!(
            c.classify(&create_test_transaction("HSBC", "Deposit", dec!(9))).category,
            FlowCategory::InvestmentPerformance
        );
        assert_eq!(
            c.classify(&create_test_transaction("HSBC", "Payout", dec!(9))).category,
            FlowCategory::ExternalOutflow
        );
    }

    #[test]
    fn test_bank_keys_differing_in_case_are_merged() {
        let config = ClassificationConfig::default()
            .with_bank(
                "Citi",
                BankTransactionMapping {
                    external_inflows: vec!["Capital Call Refund".to_string()],
                    ..Default::default()
                },
            );
        let c = CashFlowClassifier::new(config).unwrap();

        let mapping = c.mapping_for("CITI").unwrap();
        assert!(mapping.external_inflows.contains(&"Capital Call Refund".to_string()));
        assert!(mapping.external_inflows.contains(&"Cash Deposit".to_string()));
        assert_eq!(
            c.classify(&create_test_transaction("citi", "Cash Deposit", dec!(1))).category,
            FlowCategory::ExternalInflow
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "banks": {{ "ZED": {{ "externalOutflows": ["Sweep Out"] }} }}, "fallbackPolicy": "always" }}"#
        )
        .unwrap();

        let config = ClassificationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.fallback_policy, FallbackPolicy::Always);
        // Omitted sections keep their defaults.
        assert!(!config.global.inflows.is_empty());

        let c = CashFlowClassifier::new(config).unwrap();
        assert_eq!(
            c.cash_flow_amount(&create_test_transaction("ZED", "Sweep Out", dec!(80))),
            dec!(-80)
        );
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = ClassificationConfig::from_json_file("/nonexistent/aurum/classification.json")
            .unwrap_err();
        assert!(matches!(err, Error::ConfigIO(_)));
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let err = ClassificationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_invalid_extraction_pattern_fails_construction() {
        let mut config = ClassificationConfig::default();
        config.type_extraction.insert(
            "IDB".to_string(),
            TypeExtraction::Patterns {
                patterns: vec!["(".to_string()],
            },
        );
        let err = CashFlowClassifier::new(config).unwrap_err();
        assert!(matches!(err, Error::Classification(_)));
    }
}
