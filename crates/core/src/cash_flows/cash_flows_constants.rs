//! Built-in transaction type tables.
//!
//! These reproduce the labels each custodian uses in its statements. They are
//! the defaults of [`ClassificationConfig`](super::ClassificationConfig) and
//! can be replaced by a JSON configuration file.

/// Transaction type labels for one bank.
pub struct BankTypeTable {
    pub bank: &'static str,
    pub inflows: &'static [&'static str],
    pub outflows: &'static [&'static str],
    pub trading: &'static [&'static str],
    pub problematic: &'static [&'static str],
    /// Types that are investment performance by definition for this bank.
    pub investment_included: &'static [&'static str],
}

pub const CS_BANK: &str = "CS";
pub const IDB_BANK: &str = "IDB";
pub const PERSHING_BANK: &str = "PERSHING";

/// IDB writes the type as a prefix of a longer description.
pub const IDB_TYPE_PATTERNS: &[&str] = &[
    r"^(Annual Service Fee - Hold Mail)",
    r"^(Annual Maintenance Fee)",
    r"^(Annual Management Fee)",
    r"^(Interest Payment)",
    r"^(Periodic Fee)",
    r"^(Wire Transfer Credit)",
    r"^(BILL PMT)",
    r"^(Purchase)",
    r"^(Sale)",
];

/// Pershing embeds quantity, security and price in the type.
pub const PERSHING_TYPE_PATTERNS: &[&str] = &[
    r"^(Buy)\s+[\d,]+\.?\d*\s+Parvalue\s+Of\s+\w+\s+At\s+[\d.]+",
    r"^(Purchase)\s+\d+\s+Shares\s+of",
    r"^(Sell)\s+[\d,]+\.?\d*\s+Parvalue\s+Of",
];

/// Inflow labels for banks without a table of their own.
pub const GLOBAL_INFLOW_TYPES: &[&str] = &[
    "deposit",
    "bank deposit",
    "contribution",
    "Misc Cash Entry",
    "Schwab ATM Rebate",
    "Misc Debit / Credit",
    "Misc. Receipt",
    "Auto Bank Product Deposit",
    "Deposit",
    "Wire Transfer Credit",
    "Wire Transfer In",
    "Aporte",
];

/// Outflow labels for banks without a table of their own.
pub const GLOBAL_OUTFLOW_TYPES: &[&str] = &[
    "withdrawal",
    "distribution",
    "Journal",
    "Wire Sent",
    "Visa Purchase",
    "ATM Withdrawal",
    "Misc. Disbursement",
    "OUTGOING",
    "Debit Card",
    "Funds Transferred",
    "WIRE OUT",
    "Withdrawal",
    "BILL PMT",
    "Cross Border Credit Transfer",
    "Wire Transfer Out",
    "Rescate",
];

/// Labels too ambiguous to trust, for banks without a table of their own.
pub const GLOBAL_PROBLEMATIC_TYPES: &[&str] = &[
    "UNKNOWN",
    "Cost Adjustment",
    "Accrued Int Pd",
    "Subscription",
    "Activity Within Your Acct",
];

pub const BANK_TYPE_TABLES: &[BankTypeTable] = &[
    BankTypeTable {
        bank: "CS",
        inflows: &[
            "Cross Border Credit Transfer",
            "Transfer",
            "Fiduciary call deposit",
            "Fiduciary call deposit - increase",
            "Wire Transfer In",
        ],
        outflows: &[
            "Expenses for money transfer",
            "Cross Border Credit Transfer",
            "Fiduciary call deposit - reduction",
            "Fiduciary call dep. - liquidation",
            "Wire Transfer Out",
        ],
        trading: &[
            "Securities purchase",
            "Securities sale",
            "Redemption",
            "Redemption of fund units",
            "Issue of fund units",
        ],
        problematic: &[
            "Stock dividend/spin-off",
            "Foreign exchange spot transaction",
            "Equalisation payment",
        ],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "CSC",
        inflows: &["Misc Cash Entry", "Schwab ATM Rebate"],
        outflows: &["Journal", "Wire Sent", "Visa Purchase", "ATM Withdrawal"],
        trading: &["Buy", "Sell", "Full Redemption Adj"],
        problematic: &[],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "HSBC",
        inflows: &["Wire Transfer Credit", "Deposit"],
        outflows: &["Wire Transfer Debit", "Withdrawal", "Wire Out"],
        trading: &["Security Redeemed", "Purchase", "Sale"],
        problematic: &[],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "JB",
        inflows: &[],
        outflows: &["Withdrawal", "Swift payment (fax, letter)"],
        trading: &["Buy", "Sell"],
        problematic: &[],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "JPM",
        inflows: &["Misc Debit / Credit", "ACH Deposit", "Misc. Receipt"],
        outflows: &["Misc. Disbursement", "OUTGOING"],
        trading: &["Purchase", "Sale", "Redemption", "Sales of Securities"],
        problematic: &["Cost Adjustment", "UNKNOWN", "Accrued Int Pd", "Accrued Int Rcv"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "MS",
        inflows: &["Auto Bank Product Deposit", "Bank Product Deposit"],
        outflows: &["Debit Card", "Funds Transferred", "Bank Product Withdrawal"],
        trading: &["Redemption", "Bought"],
        problematic: &[
            "Dividend Reinvestment",
            "Exchange Received In",
            "Exchange Deliver Out",
            "Return of Principal",
        ],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "VALLEY",
        inflows: &["WIRE IN"],
        outflows: &[
            "WIRE OUT",
            "WIRE OUT INTL",
            "ACH DEBIT",
            "ELECTRONIFIED CHECK",
            "MISCELLANEOUS FEES",
        ],
        trading: &[],
        problematic: &["SECURITIES DEBIT"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "IDB",
        inflows: &["Wire Transfer Credit"],
        outflows: &["BILL PMT"],
        trading: &["Purchase", "Sale"],
        problematic: &["Final Maturity 1 USD United St atesTreasury Note/B"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "LO",
        inflows: &["Deposit", "Cross Border Credit Transfer"],
        outflows: &["Withdrawal", "Fees"],
        trading: &["Purchase", "Sale"],
        problematic: &["Other"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "SAFRA",
        inflows: &[],
        outflows: &[],
        trading: &[],
        problematic: &["unknown"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "PERSHING",
        inflows: &[],
        outflows: &[],
        trading: &["Buy", "Purchase", "Sell", "Security Redeemed"],
        problematic: &["Activity Within Your Acct"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "BANCHILE",
        inflows: &["Aporte"],
        outflows: &["Rescate"],
        trading: &[],
        problematic: &["--"],
        investment_included: &[],
    },
    BankTypeTable {
        bank: "ALT",
        inflows: &[],
        outflows: &[],
        trading: &["Purchase"],
        problematic: &[],
        investment_included: &["Sale", "Income", "Interest", "Distribution"],
    },
    BankTypeTable {
        bank: "CITI",
        inflows: &[
            "Cash Deposit",
            "Funds Received",
            "Auto Bank Product Deposit",
            "Online Transfer",
        ],
        outflows: &[
            "Cash Withdrawal",
            "Funds Transferred",
            "Bank Product Withdrawal",
            "Adjustment - outside Commitment ",
            "Adjustment - outside Commitment",
        ],
        trading: &[
            "Asset Purchased",
            "Purchase",
            "Bought",
            "Asset Sold",
            "Sale",
            "Sold",
            "Redemption",
        ],
        problematic: &[
            "Cost Adjustment",
            "Dividend Reinvestment",
            "Accrued Int Pd",
            "Accrued Int Rcv",
        ],
        investment_included: &[],
    },
];

/// Types reviewed and accepted as investment performance. Anything else that
/// ends up included is reported to the unrecognized-type sink.
pub const KNOWN_INVESTMENT_TYPES: &[&str] = &[
    "Cash Dividend",
    "Pr Yr Cash Div",
    "Dividend",
    "Foreign Dividend",
    "Dividends",
    "Bond Interest",
    "Credit Interest",
    "Bond Interest Recieved",
    "Interest",
    "U.S. Government Interest",
    "Corporate Interest",
    "Interest Received",
    "Interest Income",
    "Income",
    "SECURITIES CREDIT",
    "Cash Liquidation",
    "Foreign Interest",
    "Bond Interest Received",
    "Received Interest",
    "Cash dividend",
    "Interest Payment",
    "Interest payment",
    "Payment",
    "NRA Tax Adj",
    "NRA Tax",
    "Pr Yr NRA Tax",
    "Taxes",
    "Tax Withholding",
    "Non-resident Alien Tax",
    "Service Fee",
    "MISCELLANEOS FEES",
    "BALANCE FEES",
    "Management fee",
    "Safekeeping fees",
    "Annual Service Fee - Hold Mail",
    "Annual Maintenance Fee",
    "Annual Management Fee",
    "Periodic Fee",
    "Fees",
    "Investment Debit 0",
    "Buy",
    "Sell",
    "Purchase",
    "Sale",
    "Sales of Securities",
    "Bank Product Withdrawal",
    "Redemption",
    "Full Redemption Adj",
    "Security Redeemed",
    "Dividend Reinvestment",
    "Stock dividend/spin-off",
    "Other",
    "Accured Int Pd",
];
