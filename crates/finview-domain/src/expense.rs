//! Expense records and their payment/recurrence enums.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::*, common::*};

/// How an expense was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    DigitalWallet,
    Check,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 7] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::BankTransfer,
        PaymentMethod::DigitalWallet,
        PaymentMethod::Check,
        PaymentMethod::Other,
    ];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::DigitalWallet => "Digital Wallet",
            PaymentMethod::Check => "Check",
            PaymentMethod::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Cadence of a recurring expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurrenceFrequency::Daily => "Daily",
            RecurrenceFrequency::Weekly => "Weekly",
            RecurrenceFrequency::Monthly => "Monthly",
            RecurrenceFrequency::Quarterly => "Quarterly",
            RecurrenceFrequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Owner reference nested in backend records (`"user": {"id": 7}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserRefPayload {
    #[serde(default)]
    pub id: Option<i64>,
}

/// Expense as delivered by the backend list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, alias = "recurring")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<NaiveDate>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRefPayload>,
}

impl ExpensePayload {
    pub fn new(id: i64, description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Some(id),
            description: Some(description.into()),
            amount: Some(amount),
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: CategoryRefPayload) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_owner(mut self, owner: i64) -> Self {
        self.owner_user_id = Some(owner);
        self
    }

    /// Owner id from either the flat field or the nested user object.
    pub fn owner_id(&self) -> Option<i64> {
        self.owner_user_id
            .or_else(|| self.user.as_ref().and_then(|user| user.id))
    }
}

/// A validated expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<NaiveDate>,
    pub owner_user_id: UserId,
}

impl Expense {
    pub fn new(
        id: i64,
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        owner: UserId,
    ) -> Self {
        Self {
            id: ExpenseId(id),
            description: description.into(),
            amount,
            date,
            category: None,
            payment_method: None,
            notes: None,
            is_recurring: false,
            recurrence_frequency: None,
            recurrence_end_date: None,
            owner_user_id: owner,
        }
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn recurring(mut self, frequency: RecurrenceFrequency) -> Self {
        self.is_recurring = true;
        self.recurrence_frequency = Some(frequency);
        self
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

impl BelongsToCategory for Expense {
    fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }
}

impl Owned for Expense {
    fn owner(&self) -> UserId {
        self.owner_user_id
    }
}
