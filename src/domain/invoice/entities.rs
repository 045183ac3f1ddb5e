use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::services::line_amount;
use super::value_objects::{InvoiceCurrency, Percentage, round2};

// Invoice Line Item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLineItem {
  pub description: String,
  pub quantity: u32,
  pub unit_price: Decimal,
  amount: Decimal,
}

impl InvoiceLineItem {
  /// The amount is always derived from quantity and unit price.
  pub fn new(description: String, quantity: u32, unit_price: Decimal) -> Self {
    Self {
      description,
      quantity,
      unit_price,
      amount: line_amount(quantity, unit_price),
    }
  }

  pub fn amount(&self) -> Decimal {
    self.amount
  }
}

// Invoice Totals - Calculated, not persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub discount_percent: Decimal,
  pub discount_amount: Decimal,
  pub tax_percent: Decimal,
  pub tax_amount: Decimal,
  pub grand_total: Decimal,
}

impl InvoiceTotals {
  /// Discount applies first; tax is charged on the discounted subtotal.
  ///
  /// Every stage is rounded to cents before feeding the next one, so the
  /// result can differ by a cent from rounding a full-precision total once.
  /// Percentages are not range-checked here. If any stage overflows a
  /// `Decimal`, every amount is reported as zero.
  pub fn calculate(
    line_items: &[InvoiceLineItem],
    discount_percent: Option<Decimal>,
    tax_percent: Option<Decimal>,
  ) -> Self {
    let discount_percent = discount_percent.unwrap_or_default();
    let tax_percent = tax_percent.unwrap_or_default();

    Self::try_calculate(line_items, discount_percent, tax_percent).unwrap_or_else(|| {
      tracing::warn!(
        items = line_items.len(),
        "Invoice totals overflowed; reporting zero"
      );
      Self {
        subtotal: Decimal::ZERO,
        discount_percent,
        discount_amount: Decimal::ZERO,
        tax_percent,
        tax_amount: Decimal::ZERO,
        grand_total: Decimal::ZERO,
      }
    })
  }

  fn try_calculate(
    line_items: &[InvoiceLineItem],
    discount_percent: Decimal,
    tax_percent: Decimal,
  ) -> Option<Self> {
    let subtotal = line_items
      .iter()
      .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount()))
      .map(round2)?;
    let discount_amount = round2(percent_of(subtotal, discount_percent)?);
    let taxable_base = subtotal.checked_sub(discount_amount)?;
    let tax_amount = round2(percent_of(taxable_base, tax_percent)?);
    let grand_total = round2(taxable_base.checked_add(tax_amount)?);

    Some(Self {
      subtotal,
      discount_percent,
      discount_amount,
      tax_percent,
      tax_amount,
      grand_total,
    })
  }

  pub fn taxable_base(&self) -> Decimal {
    self.subtotal - self.discount_amount
  }
}

fn percent_of(base: Decimal, percent: Decimal) -> Option<Decimal> {
  base
    .checked_mul(percent)?
    .checked_div(Decimal::ONE_HUNDRED)
}

// Customer the invoice is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCustomer {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetails {
  pub title: String,
  pub currency: InvoiceCurrency,
  pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstructions {
  pub account_number: String,
  pub bank_name: String,
  pub routing_number: Option<String>,
}

/// A filled-in invoice, ready to preview or submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
  pub customers: Vec<InvoiceCustomer>,
  pub address: String,
  pub details: InvoiceDetails,
  pub line_items: Vec<InvoiceLineItem>,
  pub discount: Percentage,
  pub tax: Percentage,
  pub additional_notes: Option<String>,
  pub payment_instructions: Option<PaymentInstructions>,
}

impl InvoiceDocument {
  pub fn totals(&self) -> InvoiceTotals {
    InvoiceTotals::calculate(
      &self.line_items,
      Some(self.discount.value()),
      Some(self.tax.value()),
    )
  }

  pub fn currency(&self) -> InvoiceCurrency {
    self.details.currency
  }
}
