use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::dtos::{InvoiceTotalsDto, LineItemDto, validate_percentage};
use crate::application::rates::AmountInput;
use crate::domain::invoice::{InvoiceLineItem, InvoiceTotals};

/// A row as it stands mid-edit. Nothing is required: the name may be blank
/// and quantity or price may be a number, the raw field text, or missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditedItemDto {
  #[serde(default, alias = "description")]
  pub name: Option<String>,

  #[serde(default)]
  pub quantity: Option<AmountInput>,

  #[serde(default, alias = "unitPrice")]
  pub price: Option<AmountInput>,
}

impl EditedItemDto {
  /// Unparseable fields count as zero. Quantities are truncated to whole
  /// units; negative or oversized ones count as zero.
  pub fn into_line_item(self) -> InvoiceLineItem {
    let quantity = self
      .quantity
      .as_ref()
      .and_then(AmountInput::to_decimal)
      .and_then(|quantity| quantity.trunc().to_u32())
      .unwrap_or(0);
    let price = self
      .price
      .as_ref()
      .and_then(AmountInput::to_decimal)
      .unwrap_or_default();

    InvoiceLineItem::new(self.name.unwrap_or_default(), quantity, price)
  }
}

/// Rows and percentages as they stand while the form is being edited.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CalculateTotalsCommand {
  #[serde(default)]
  pub items: Vec<EditedItemDto>,

  #[serde(default)]
  #[validate(custom(function = "validate_percentage"))]
  pub discount: Option<Decimal>,

  #[serde(default)]
  #[validate(custom(function = "validate_percentage"))]
  pub tax: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct CalculateTotalsResponse {
  pub items: Vec<LineItemDto>,
  pub totals: InvoiceTotalsDto,
}

/// Live totals for a partially filled form. An empty item list is allowed
/// and yields zero totals.
pub struct CalculateTotalsUseCase;

impl CalculateTotalsUseCase {
  pub fn new() -> Self {
    Self
  }

  pub fn execute(&self, command: CalculateTotalsCommand) -> CalculateTotalsResponse {
    let line_items: Vec<InvoiceLineItem> = command
      .items
      .into_iter()
      .map(EditedItemDto::into_line_item)
      .collect();

    let totals = InvoiceTotals::calculate(&line_items, command.discount, command.tax);

    CalculateTotalsResponse {
      items: line_items.iter().map(LineItemDto::from).collect(),
      totals: InvoiceTotalsDto::from(&totals),
    }
  }
}

impl Default for CalculateTotalsUseCase {
  fn default() -> Self {
    Self::new()
  }
}
