use chrono::{NaiveDate, TimeZone, Utc};
use wa_gateway::{
    compose::{compose, test_message},
    models::notification::{Notification, VoucherCredential},
};

use crate::common::{APP_NAME, customer, invoice};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
}

/// Test: Invoice copy carries the number, package, amount and due date
#[test]
fn test_invoice_copy() {
    let message = compose(
        &Notification::InvoiceIssued {
            customer: customer(),
            invoice: invoice(),
        },
        APP_NAME,
        today(),
    );

    assert!(message.starts_with("Halo *Budi*,\n\nTagihan internet Anda telah terbit:"));
    assert!(message.contains("📋 *Invoice:* INV-2025-0042\n"));
    assert!(message.contains("📦 *Paket:* Home 20 Mbps\n"));
    assert!(message.contains("💰 *Total:* Rp 150.000\n"));
    assert!(message.contains("📅 *Jatuh Tempo:* 10 Mar 2025\n"));
    assert!(message.ends_with("Terima kasih,\n*NetLink*"));
}

/// Test: Payment confirmation falls back to today for the paid date
#[test]
fn test_payment_copy_defaults_paid_date() {
    let message = compose(
        &Notification::PaymentConfirmed {
            customer: customer(),
            invoice: invoice(),
        },
        APP_NAME,
        today(),
    );

    assert!(message.contains("✅ Pembayaran Anda telah kami terima!"));
    assert!(message.contains("💰 *Jumlah:* Rp 150.000\n"));
    assert!(message.contains("📅 *Tanggal Bayar:* 12 Mar 2025\n"));

    let mut paid = invoice();
    paid.paid_date = NaiveDate::from_ymd_opt(2025, 3, 1);
    let message = compose(
        &Notification::PaymentConfirmed {
            customer: customer(),
            invoice: paid,
        },
        APP_NAME,
        today(),
    );
    assert!(message.contains("📅 *Tanggal Bayar:* 01 Mar 2025\n"));
}

/// Test: Reminders without a due date show a dash
#[test]
fn test_reminder_copy_without_due_date() {
    let mut open = invoice();
    open.due_date = None;

    let message = compose(
        &Notification::PaymentReminder {
            customer: customer(),
            invoice: open,
        },
        APP_NAME,
        today(),
    );

    assert!(message.starts_with("⚠️ *Pengingat Pembayaran*\n\nHalo *Budi*,"));
    assert!(message.contains("📅 *Jatuh Tempo:* -\n"));
    assert!(message.ends_with("*NetLink*"));
}

/// Test: Suspension copy names the customer
#[test]
fn test_suspension_copy() {
    let message = compose(
        &Notification::ServiceSuspended {
            customer: customer(),
        },
        APP_NAME,
        today(),
    );

    assert!(message.starts_with("🚫 *Pemberitahuan Penangguhan Layanan*"));
    assert!(message.contains("Halo *Budi*,"));
}

/// Test: Vouchers are numbered from one
#[test]
fn test_voucher_copy_numbers_each_voucher() {
    let message = compose(
        &Notification::VoucherDelivery {
            phone: "081234567890".to_string(),
            package: "Mingguan".to_string(),
            vouchers: vec![
                VoucherCredential {
                    code: "AAA111".to_string(),
                    password: "p1".to_string(),
                },
                VoucherCredential {
                    code: "BBB222".to_string(),
                    password: "p2".to_string(),
                },
            ],
        },
        APP_NAME,
        today(),
    );

    assert!(message.contains("Paket: *Mingguan*"));
    assert!(message.contains("Voucher 1:\n👤 Username: `AAA111`\n🔑 Password: `p1`\n\n"));
    assert!(message.contains("Voucher 2:\n👤 Username: `BBB222`\n🔑 Password: `p2`\n\n"));
    assert!(message.contains("3. Masukkan username & password\n\n"));
    assert!(message.ends_with("Terima kasih!\n*NetLink*"));
}

/// Test: The connectivity test message is timestamped
#[test]
fn test_connection_test_message() {
    let now = Utc.with_ymd_and_hms(2025, 3, 12, 8, 5, 9).unwrap();

    assert_eq!(
        test_message(APP_NAME, now),
        "🔔 Test koneksi dari NetLink - 12/03/2025 08:05:09"
    );
}
