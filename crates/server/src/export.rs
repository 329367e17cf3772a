//! CSV export of customers and orders.
//!
//! A pure formatting concern over already-computed entities: the admin
//! downloads these as backup/offline copies. Quoting is handled by the csv
//! crate, so free-text fields containing commas produce valid rows.

use csv::Writer;

use kirana_core::{Customer, Order};

/// Error building a CSV document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Date column format. The export is a human-facing report, not a data
/// interchange format, so dates are plain days.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render all customers as a CSV document.
///
/// Columns: `ID, Full Name, Phone Number, Shop Name, Delivery Location,
/// Registered At`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn customers_csv(customers: &[Customer]) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record([
        "ID",
        "Full Name",
        "Phone Number",
        "Shop Name",
        "Delivery Location",
        "Registered At",
    ])?;

    for customer in customers {
        writer.write_record([
            customer.id.as_str(),
            &customer.full_name,
            customer.phone_number.as_str(),
            customer.shop_name.as_deref().unwrap_or(""),
            &customer.delivery_location,
            &customer.registered_at.format(DATE_FORMAT).to_string(),
        ])?;
    }

    finish(writer)
}

/// Render all orders as a CSV document.
///
/// Columns: `ID, Customer Name, Phone, Total Items, Grand Total, Status,
/// Date`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn orders_csv(orders: &[Order]) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record([
        "ID",
        "Customer Name",
        "Phone",
        "Total Items",
        "Grand Total",
        "Status",
        "Date",
    ])?;

    for order in orders {
        writer.write_record([
            order.id.as_str(),
            &order.customer_name,
            order.customer_phone.as_str(),
            &order.total_items.to_string(),
            &order.grand_total.to_string(),
            order.status.as_str(),
            &order.created_at.format(DATE_FORMAT).to_string(),
        ])?;
    }

    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use kirana_core::{
        CustomerId, OrderId, OrderItem, OrderStatus, PhoneNumber, ProductId,
    };

    use super::*;

    fn customer() -> Customer {
        Customer {
            id: CustomerId::new("cust-1"),
            full_name: "Asha Traders".to_owned(),
            phone_number: PhoneNumber::parse("9830012345").unwrap(),
            shop_name: None,
            delivery_location: "12 Canal Road, Howrah".to_owned(),
            registered_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    fn order() -> Order {
        Order {
            id: OrderId::new("order-1"),
            customer_id: CustomerId::new("cust-1"),
            customer_name: "Asha Traders".to_owned(),
            customer_phone: PhoneNumber::parse("9830012345").unwrap(),
            items: vec![OrderItem {
                product_id: ProductId::new("rice-1"),
                product_name: "Swastik Miniket".to_owned(),
                unit_price: 1599,
                quantity: 2,
                line_total: 3198,
            }],
            total_items: 2,
            grand_total: 3198,
            status: OrderStatus::Received,
            is_paid: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_customers_csv_columns() {
        let csv = customers_csv(&[customer()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Full Name,Phone Number,Shop Name,Delivery Location,Registered At"
        );
        // Comma in the free-text location forces quoting.
        assert_eq!(
            lines.next().unwrap(),
            "cust-1,Asha Traders,9830012345,,\"12 Canal Road, Howrah\",2025-03-14"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_orders_csv_columns() {
        let csv = orders_csv(&[order()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Customer Name,Phone,Total Items,Grand Total,Status,Date"
        );
        assert_eq!(
            lines.next().unwrap(),
            "order-1,Asha Traders,9830012345,2,3198,received,2025-03-15"
        );
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = customers_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
