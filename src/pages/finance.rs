//! Finance page: balances, bank accounts and withdrawals

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::pages::{Services, validate_form};
use crate::submit::{Feedback, SubmissionPipeline};
use crate::validate::{Form, FormState, FormValues, Schema};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

/// Shown once a bank account is added
pub const ACCOUNT_ADDED: &str = "Bank account added successfully!";

/// Shown once a withdrawal is requested
pub const WITHDRAWAL_REQUESTED: &str = "Withdrawal request submitted successfully!";

static BANK_ACCOUNT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("bank account")
        .text("bankName")
        .min_length(1, "Bank name is required")
        .text("accountNumber")
        .min_length(10, "Account number must be at least 10 digits")
        .text("accountName")
        .min_length(2, "Account name is required")
        .text("accountType")
        .min_length(1, "Account type is required")
        .build()
        .expect("bank account schema is well-formed")
});

static WITHDRAWAL: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("withdrawal")
        .number("amount")
        .min(1000.0, "Minimum withdrawal amount is ₦1,000")
        .text("bankAccountId")
        .min_length(1, "Please select a bank account")
        .build()
        .expect("withdrawal schema is well-formed")
});

/// A validated bank account entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountForm {
    /// Bank name
    pub bank_name: String,
    /// NUBAN account number
    pub account_number: String,
    /// Name on the account
    pub account_name: String,
    /// `Savings` or `Current`
    pub account_type: String,
}

impl Form for BankAccountForm {
    fn schema() -> &'static Schema {
        &BANK_ACCOUNT
    }
}

/// A validated withdrawal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalForm {
    /// Amount in naira
    pub amount: f64,
    /// Destination account id
    pub bank_account_id: String,
}

impl Form for WithdrawalForm {
    fn schema() -> &'static Schema {
        &WITHDRAWAL
    }
}

/// A payout destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Account id
    pub id: String,
    /// Bank name
    pub bank_name: String,
    /// Account number
    pub account_number: String,
    /// Name on the account
    pub account_name: String,
    /// `Savings` or `Current`
    pub account_type: String,
    /// Whether payouts go here by default
    pub is_default: bool,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in from a sale
    Earning,
    /// Money out to a bank account
    Withdrawal,
}

/// Settlement status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Settled
    Completed,
    /// Awaiting settlement
    Pending,
    /// Being paid out
    Processing,
    /// Did not go through
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One line of the transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id
    pub id: String,
    /// Earning or withdrawal
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// What it was for
    pub description: String,
    /// Signed amount in naira; withdrawals are negative
    pub amount: f64,
    /// Settlement status
    pub status: TransactionStatus,
    /// Booking date
    pub date: NaiveDate,
}

/// Earnings and withdrawals of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEarnings {
    /// Short month name
    pub month: String,
    /// Earned in naira
    pub earnings: f64,
    /// Withdrawn in naira
    pub withdrawals: f64,
}

/// Balance overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    /// Lifetime earnings
    pub total_earnings: f64,
    /// Ready to withdraw
    pub available_balance: f64,
    /// Not yet settled
    pub pending_balance: f64,
    /// Lifetime withdrawals
    pub total_withdrawn: f64,
    /// Oldest month first
    pub monthly: Vec<MonthlyEarnings>,
}

impl FinanceSummary {
    /// Mocked figures of the demo seller
    pub fn demo() -> Self {
        let monthly = [
            ("Jan", 85_000.0, 50_000.0),
            ("Feb", 92_000.0, 60_000.0),
            ("Mar", 78_000.0, 45_000.0),
            ("Apr", 105_000.0, 70_000.0),
            ("May", 98_000.0, 50_000.0),
            ("Jun", 112_000.0, 80_000.0),
        ]
        .into_iter()
        .map(|(month, earnings, withdrawals)| MonthlyEarnings {
            month: month.to_string(),
            earnings,
            withdrawals,
        })
        .collect();

        Self {
            total_earnings: 1_250_000.0,
            available_balance: 850_000.0,
            pending_balance: 125_000.0,
            total_withdrawn: 275_000.0,
            monthly,
        }
    }

    /// Percentage change of the latest month's earnings over the one before
    pub fn earnings_growth(&self) -> Option<f64> {
        let [.., previous, current] = self.monthly.as_slice() else {
            return None;
        };
        if previous.earnings.abs() < f64::EPSILON {
            return None;
        }
        Some((current.earnings - previous.earnings) / previous.earnings * 100.0)
    }
}

/// The finance page
pub struct FinancePage {
    clock: Arc<dyn Clock>,
    account_form: FormState,
    withdrawal_form: FormState,
    accounts: Vec<BankAccount>,
    transactions: Vec<Transaction>,
    summary: FinanceSummary,
    account_pipeline: SubmissionPipeline,
    withdrawal_pipeline: SubmissionPipeline,
}

impl FinancePage {
    /// Page over the given records
    pub fn new(
        services: &Services,
        accounts: Vec<BankAccount>,
        transactions: Vec<Transaction>,
        summary: FinanceSummary,
    ) -> Self {
        let delay = services.settings.delays.form();
        Self {
            clock: services.clock.clone(),
            account_form: FormState::new(),
            withdrawal_form: FormState::new(),
            accounts,
            transactions,
            summary,
            account_pipeline: services.pipeline("bank account", delay),
            withdrawal_pipeline: services.pipeline("withdrawal", delay),
        }
    }

    /// Page over the mocked records of the demo seller
    pub fn demo(services: &Services) -> Self {
        Self::new(
            services,
            demo_accounts(),
            demo_transactions(),
            FinanceSummary::demo(),
        )
    }

    /// Bank-account form
    pub const fn account_form(&self) -> &FormState {
        &self.account_form
    }

    /// Withdrawal form
    pub const fn withdrawal_form(&self) -> &FormState {
        &self.withdrawal_form
    }

    /// Fill the bank-account form
    pub fn fill_account(&mut self, values: FormValues) {
        self.account_form.fill(values);
    }

    /// Fill the withdrawal form
    pub fn fill_withdrawal(&mut self, values: FormValues) {
        self.withdrawal_form.fill(values);
    }

    /// Registered bank accounts
    pub fn accounts(&self) -> &[BankAccount] {
        &self.accounts
    }

    /// Transaction history, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Balance overview
    pub const fn summary(&self) -> &FinanceSummary {
        &self.summary
    }

    /// Validate and add a bank account
    ///
    /// The first account on file becomes the default.
    pub async fn add_account(&mut self, feedback: &dyn Feedback) -> Result<BankAccount> {
        let form: BankAccountForm =
            validate_form(&mut self.account_form, "bank account", feedback).await?;
        self.account_pipeline.submit(&form, feedback).await?;

        let account = BankAccount {
            id: self.next_id(),
            bank_name: form.bank_name,
            account_number: form.account_number,
            account_name: form.account_name,
            account_type: form.account_type,
            is_default: self.accounts.is_empty(),
        };
        info!(id = %account.id, bank = %account.bank_name, "bank account added");
        self.accounts.push(account.clone());

        self.account_form.reset();
        self.account_pipeline.reset();
        feedback.on_alert(ACCOUNT_ADDED).await;

        Ok(account)
    }

    /// Validate and request a withdrawal to one of the bank accounts
    pub async fn withdraw(&mut self, feedback: &dyn Feedback) -> Result<Transaction> {
        let form: WithdrawalForm =
            validate_form(&mut self.withdrawal_form, "withdrawal", feedback).await?;

        let Some(bank_name) = self
            .accounts
            .iter()
            .find(|a| a.id == form.bank_account_id)
            .map(|a| a.bank_name.clone())
        else {
            warn!(id = %form.bank_account_id, "withdrawal to unknown account");
            let err = Error::BankAccountNotFound(form.bank_account_id);
            feedback.on_alert(&err.to_string()).await;
            return Err(err);
        };

        self.withdrawal_pipeline.submit(&form, feedback).await?;

        let transaction = Transaction {
            id: self.next_id(),
            kind: TransactionKind::Withdrawal,
            description: format!("Withdrawal to {bank_name}"),
            amount: -form.amount,
            status: TransactionStatus::Processing,
            date: self.clock.now().date_naive(),
        };
        info!(amount = form.amount, bank = %bank_name, "withdrawal requested");
        self.transactions.insert(0, transaction.clone());

        self.withdrawal_form.reset();
        self.withdrawal_pipeline.reset();
        feedback.on_alert(WITHDRAWAL_REQUESTED).await;

        Ok(transaction)
    }

    /// Remove a bank account
    pub fn delete_account(&mut self, id: &str) -> Result<BankAccount> {
        let pos = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::BankAccountNotFound(id.to_string()))?;
        Ok(self.accounts.remove(pos))
    }

    /// Millisecond timestamp id, bumped past any id already in use
    fn next_id(&self) -> String {
        let mut n = self.clock.now().timestamp_millis();
        loop {
            let id = n.to_string();
            let taken = self.accounts.iter().any(|a| a.id == id)
                || self.transactions.iter().any(|t| t.id == id);
            if !taken {
                return id;
            }
            n += 1;
        }
    }
}

fn demo_accounts() -> Vec<BankAccount> {
    [
        ("1", "First Bank", "1234567890", "Savings", true),
        ("2", "GTBank", "0987654321", "Current", false),
    ]
    .into_iter()
    .map(|(id, bank, number, kind, is_default)| BankAccount {
        id: id.to_string(),
        bank_name: bank.to_string(),
        account_number: number.to_string(),
        account_name: "John Doe".to_string(),
        account_type: kind.to_string(),
        is_default,
    })
    .collect()
}

fn demo_transactions() -> Vec<Transaction> {
    use TransactionKind::{Earning, Withdrawal};
    use TransactionStatus::{Completed, Pending, Processing};

    [
        ("1", Earning, "Sale of Nike Air Max 270", 85_000.0, Completed, 20),
        ("2", Withdrawal, "Withdrawal to First Bank", -50_000.0, Completed, 19),
        ("3", Earning, "Sale of iPhone 15 Pro", 120_000.0, Pending, 18),
        ("4", Withdrawal, "Withdrawal to GTBank", -75_000.0, Processing, 17),
        ("5", Earning, "Sale of Samsung Galaxy Watch", 32_000.0, Completed, 16),
    ]
    .into_iter()
    .map(|(id, kind, description, amount, status, day)| Transaction {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        amount,
        status,
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
    })
    .collect()
}
