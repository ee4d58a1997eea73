//! Fixed Indonesian message copy for the built-in notification kinds.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::notification::{Customer, Invoice, Notification, VoucherCredential};

const DATE_FORMAT: &str = "%d %b %Y";

/// Formats whole rupiah with `.` thousand separators, e.g. `Rp 150.000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Message body for `notification`. `today` stands in for a missing paid date.
pub fn compose(notification: &Notification, app_name: &str, today: NaiveDate) -> String {
    match notification {
        Notification::InvoiceIssued { customer, invoice } => {
            invoice_issued(customer, invoice, app_name)
        }
        Notification::PaymentConfirmed { customer, invoice } => {
            payment_confirmed(customer, invoice, app_name, today)
        }
        Notification::PaymentReminder { customer, invoice } => {
            payment_reminder(customer, invoice, app_name)
        }
        Notification::ServiceSuspended { customer } => service_suspended(customer, app_name),
        Notification::VoucherDelivery {
            package, vouchers, ..
        } => voucher_delivery(package, vouchers, app_name),
    }
}

fn invoice_issued(customer: &Customer, invoice: &Invoice, app_name: &str) -> String {
    format!(
        "Halo *{name}*,\n\n\
         Tagihan internet Anda telah terbit:\n\n\
         📋 *Invoice:* {number}\n\
         📦 *Paket:* {package}\n\
         💰 *Total:* {amount}\n\
         📅 *Jatuh Tempo:* {due}\n\n\
         Silakan lakukan pembayaran sebelum jatuh tempo.\n\n\
         Terima kasih,\n\
         *{app}*",
        name = customer.name,
        number = invoice.number,
        package = invoice.package_name,
        amount = format_rupiah(invoice.amount),
        due = format_date(invoice.due_date),
        app = app_name,
    )
}

fn payment_confirmed(
    customer: &Customer,
    invoice: &Invoice,
    app_name: &str,
    today: NaiveDate,
) -> String {
    format!(
        "Halo *{name}*,\n\n\
         ✅ Pembayaran Anda telah kami terima!\n\n\
         📋 *Invoice:* {number}\n\
         💰 *Jumlah:* {amount}\n\
         📅 *Tanggal Bayar:* {paid}\n\n\
         Terima kasih atas pembayaran Anda.\n\n\
         *{app}*",
        name = customer.name,
        number = invoice.number,
        amount = format_rupiah(invoice.amount),
        paid = format_date(Some(invoice.paid_date.unwrap_or(today))),
        app = app_name,
    )
}

fn payment_reminder(customer: &Customer, invoice: &Invoice, app_name: &str) -> String {
    format!(
        "⚠️ *Pengingat Pembayaran*\n\n\
         Halo *{name}*,\n\n\
         Tagihan Anda belum dibayar:\n\n\
         📋 *Invoice:* {number}\n\
         💰 *Total:* {amount}\n\
         📅 *Jatuh Tempo:* {due}\n\n\
         Mohon segera lakukan pembayaran untuk menghindari pemutusan layanan.\n\n\
         *{app}*",
        name = customer.name,
        number = invoice.number,
        amount = format_rupiah(invoice.amount),
        due = format_date(invoice.due_date),
        app = app_name,
    )
}

fn service_suspended(customer: &Customer, app_name: &str) -> String {
    format!(
        "🚫 *Pemberitahuan Penangguhan Layanan*\n\n\
         Halo *{name}*,\n\n\
         Layanan internet Anda telah ditangguhkan karena tunggakan pembayaran.\n\n\
         Silakan hubungi kami atau lakukan pembayaran untuk mengaktifkan kembali layanan Anda.\n\n\
         *{app}*",
        name = customer.name,
        app = app_name,
    )
}

fn voucher_delivery(package: &str, vouchers: &[VoucherCredential], app_name: &str) -> String {
    let mut message = format!("🎫 *Voucher Internet Anda*\n\nPaket: *{}*\n\n", package);

    for (index, voucher) in vouchers.iter().enumerate() {
        message.push_str(&format!(
            "Voucher {}:\n👤 Username: `{}`\n🔑 Password: `{}`\n\n",
            index + 1,
            voucher.code,
            voucher.password
        ));
    }

    message.push_str(
        "Cara pakai:\n\
         1. Hubungkan ke WiFi\n\
         2. Buka browser\n\
         3. Masukkan username & password\n\n\
         Terima kasih!\n",
    );
    message.push_str(&format!("*{}*", app_name));

    message
}

/// Body of the connectivity test message.
pub fn test_message(app_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "🔔 Test koneksi dari {} - {}",
        app_name,
        now.format("%d/%m/%Y %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(150000), "Rp 150.000");
        assert_eq!(format_rupiah(1250000), "Rp 1.250.000");
        assert_eq!(format_rupiah(-5000), "Rp -5.000");
    }

    #[test]
    fn missing_due_date_renders_dash() {
        assert_eq!(format_date(None), "-");
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(Some(date)), "05 Jan 2025");
    }
}
