use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::invoice::{
  InvoiceCurrency, InvoiceCustomer, InvoiceDetails, InvoiceDocument, InvoiceError,
  InvoiceLineItem, InvoiceTotals, PaymentInstructions, Percentage,
};

pub(crate) fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
  if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
    return Err(
      ValidationError::new("percentage_range")
        .with_message("Percentage must be between 0 and 100".into()),
    );
  }
  Ok(())
}

/// Upper bound for a unit price on a submitted invoice.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000000);

/// Upper bound for a row quantity on a submitted invoice.
pub const MAX_QUANTITY: u32 = 1_000_000;

fn validate_unit_price(value: &Decimal) -> Result<(), ValidationError> {
  if *value < Decimal::ZERO {
    return Err(
      ValidationError::new("unit_price_min").with_message("Price must be at least 0".into()),
    );
  }
  if *value > MAX_UNIT_PRICE {
    return Err(
      ValidationError::new("unit_price_max")
        .with_message("Price must be at most 1000000000000".into()),
    );
  }
  Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// One invoice row as entered on the form. The amount is never accepted from
/// the client; it is derived when the row is converted.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemDto {
  #[serde(alias = "description")]
  #[validate(length(min = 1, message = "Item description is required"))]
  pub name: String,

  #[validate(range(
    min = 1,
    max = MAX_QUANTITY,
    message = "Quantity must be between 1 and 1000000"
  ))]
  pub quantity: u32,

  #[serde(alias = "unitPrice")]
  #[validate(custom(function = "validate_unit_price"))]
  pub price: Decimal,
}

impl InvoiceItemDto {
  pub fn into_line_item(self) -> InvoiceLineItem {
    InvoiceLineItem::new(self.name, self.quantity, self.price)
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerDetailsDto {
  #[validate(length(min = 1, message = "Customer name is required"))]
  pub name: String,

  #[validate(email(message = "Invalid email address"))]
  pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetailsDto {
  #[validate(length(min = 1, message = "Invoice title is required"))]
  pub title: String,

  #[serde(default)]
  pub currency: InvoiceCurrency,

  pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstructionsDto {
  #[serde(default)]
  pub account_number: String,
  #[serde(default)]
  pub bank_name: String,
  #[serde(default)]
  pub routing_number: Option<String>,
}

/// The invoice generator form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormDto {
  #[validate(nested)]
  pub customer_details: Vec<CustomerDetailsDto>,

  #[validate(length(min = 1, message = "Address is required"))]
  pub address_details: String,

  #[validate(nested)]
  pub invoice_details: InvoiceDetailsDto,

  #[validate(nested)]
  pub items: Vec<InvoiceItemDto>,

  #[serde(default)]
  #[validate(custom(function = "validate_percentage"))]
  pub discount: Option<Decimal>,

  #[serde(default)]
  #[validate(custom(function = "validate_percentage"))]
  pub tax: Option<Decimal>,

  #[serde(default)]
  pub additional_notes: Option<String>,

  #[serde(default)]
  pub payment_instructions: PaymentInstructionsDto,
}

impl InvoiceFormDto {
  /// Converts a validated form. Payment instructions are kept only when an
  /// account number was entered.
  pub fn into_document(self) -> Result<InvoiceDocument, InvoiceError> {
    let discount = Percentage::new(self.discount.unwrap_or_default())?;
    let tax = Percentage::new(self.tax.unwrap_or_default())?;

    let payment = self.payment_instructions;
    let payment_instructions = if payment.account_number.trim().is_empty() {
      None
    } else {
      Some(PaymentInstructions {
        account_number: payment.account_number,
        bank_name: payment.bank_name,
        routing_number: non_blank(payment.routing_number),
      })
    };

    Ok(InvoiceDocument {
      customers: self
        .customer_details
        .into_iter()
        .map(|c| InvoiceCustomer {
          name: c.name,
          email: c.email,
        })
        .collect(),
      address: self.address_details,
      details: InvoiceDetails {
        title: self.invoice_details.title,
        currency: self.invoice_details.currency,
        due_date: self.invoice_details.due_date,
      },
      line_items: self
        .items
        .into_iter()
        .map(InvoiceItemDto::into_line_item)
        .collect(),
      discount,
      tax,
      additional_notes: non_blank(self.additional_notes),
      payment_instructions,
    })
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemDto {
  pub description: String,
  pub quantity: u32,
  pub unit_price: Decimal,
  pub amount: Decimal,
}

impl From<&InvoiceLineItem> for LineItemDto {
  fn from(item: &InvoiceLineItem) -> Self {
    Self {
      description: item.description.clone(),
      quantity: item.quantity,
      unit_price: item.unit_price,
      amount: item.amount(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceTotalsDto {
  pub subtotal: Decimal,
  pub discount_percent: Decimal,
  pub discount_amount: Decimal,
  pub taxable_base: Decimal,
  pub tax_percent: Decimal,
  pub tax_amount: Decimal,
  pub grand_total: Decimal,
}

impl From<&InvoiceTotals> for InvoiceTotalsDto {
  fn from(totals: &InvoiceTotals) -> Self {
    Self {
      subtotal: totals.subtotal,
      discount_percent: totals.discount_percent,
      discount_amount: totals.discount_amount,
      taxable_base: totals.taxable_base(),
      tax_percent: totals.tax_percent,
      tax_amount: totals.tax_amount,
      grand_total: totals.grand_total,
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn sample_form_json() -> serde_json::Value {
    serde_json::json!({
      "customerDetails": [{"name": "Ada Obi", "email": "ada@example.com"}],
      "addressDetails": "12 Admiralty Way, Lekki",
      "invoiceDetails": {"title": "Landing page", "currency": "NGN", "dueDate": "2026-11-30"},
      "items": [
        {"name": "Design", "quantity": 3, "price": 19.999},
        {"name": "Copywriting", "quantity": 1, "price": "40"}
      ],
      "discount": 10,
      "tax": 7.5,
      "additionalNotes": "",
      "paymentInstructions": {
        "accountNumber": "0123456789",
        "bankName": "GTBank",
        "routingNumber": ""
      }
    })
  }

  pub(crate) fn sample_form() -> InvoiceFormDto {
    serde_json::from_value(sample_form_json()).unwrap()
  }

  #[test]
  fn test_valid_form_converts_to_document() {
    let form = sample_form();
    assert!(form.validate().is_ok());

    let document = form.into_document().unwrap();
    assert_eq!(document.line_items[0].amount(), dec!(60.00));
    assert_eq!(document.currency(), InvoiceCurrency::NGN);
    assert_eq!(document.additional_notes, None);

    let payment = document.payment_instructions.unwrap();
    assert_eq!(payment.bank_name, "GTBank");
    assert_eq!(payment.routing_number, None);
  }

  #[test]
  fn test_client_supplied_amount_is_ignored() {
    let item: InvoiceItemDto =
      serde_json::from_str(r#"{"name": "Design", "quantity": 2, "price": 10, "amount": 999}"#)
        .unwrap();
    assert_eq!(item.into_line_item().amount(), dec!(20.00));
  }

  #[test]
  fn test_form_rejects_out_of_range_values() {
    let mut form = sample_form();
    form.discount = Some(dec!(120));
    form.items[0].quantity = 0;
    form.items[1].price = dec!(-1);
    form.customer_details[0].email = "not-an-email".to_string();

    let errors = form.validate().unwrap_err();
    let fields = errors.errors();
    assert!(fields.contains_key("discount"));
    assert!(fields.contains_key("items"));
    assert!(fields.contains_key("customer_details"));
  }

  #[test]
  fn test_form_rejects_rows_too_large_to_total() {
    let mut json = sample_form_json();
    json["items"][0] = serde_json::json!({
      "name": "Retainer",
      "quantity": 4000000000u64,
      "price": "79228162514264337593543950"
    });
    let form: InvoiceFormDto = serde_json::from_value(json).unwrap();

    let errors = form.validate().unwrap_err();
    assert!(errors.errors().contains_key("items"));

    let mut at_limit = sample_form();
    at_limit.items[0].quantity = MAX_QUANTITY;
    at_limit.items[0].price = MAX_UNIT_PRICE;
    assert!(at_limit.validate().is_ok());
    assert_eq!(
      at_limit.into_document().unwrap().totals().subtotal,
      dec!(1000000000000000040.00)
    );
  }

  #[test]
  fn test_missing_percentages_and_payment_default() {
    let mut json = sample_form_json();
    let object = json.as_object_mut().unwrap();
    object.remove("discount");
    object.remove("tax");
    object.remove("paymentInstructions");

    let form: InvoiceFormDto = serde_json::from_value(json).unwrap();
    assert!(form.validate().is_ok());

    let document = form.into_document().unwrap();
    assert_eq!(document.discount.value(), Decimal::ZERO);
    assert_eq!(document.payment_instructions, None);
  }

  #[test]
  fn test_totals_dto_exposes_taxable_base() {
    let totals = InvoiceTotals::calculate(
      &[InvoiceLineItem::new("Design".to_string(), 1, dec!(100))],
      Some(dec!(10)),
      Some(dec!(10)),
    );
    let dto = InvoiceTotalsDto::from(&totals);
    assert_eq!(dto.taxable_base, dec!(90.00));
    assert_eq!(dto.grand_total, dec!(99.00));
  }
}
