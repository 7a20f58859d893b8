//! Message bodies for outgoing notifications.
//!
//! Release notifications render a table-based HTML body plus a plain
//! text alternative; free-form messages get a minimal HTML wrapper
//! around the text.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

/// Release fields the notification templates render. Arrives as part of
/// the send request, so every field tolerates being absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseEmailData {
    #[serde(default)]
    pub release_version: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

/// "Monday, September 1, 2025" when the date parses, the raw string
/// otherwise.
fn long_date(raw: &str) -> String {
    match raw.parse::<NaiveDate>() {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn status_color(status: &str) -> &'static str {
    match status {
        "Blocked" => "#dc3545",
        "Completed" => "#28a745",
        "In Progress" => "#ffc107",
        _ => "#0078d7",
    }
}

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        "Not Specified"
    } else {
        value
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn detail_row(label: &str, value: &str, value_style: &str) -> String {
    format!(
        concat!(
            "<tr>",
            r#"<td style="background-color: #f8f9fa; border: 1px solid #dee2e6; font-weight: bold; padding: 12px; width: 40%;">{label}</td>"#,
            r#"<td style="border: 1px solid #dee2e6; padding: 12px;{style}">{value}</td>"#,
            "</tr>"
        ),
        label = label,
        style = value_style,
        value = escape_html(value),
    )
}

/// HTML body for a release notification: blue header with the version,
/// details table, optional notes block, footer.
pub fn release_html(release: &ReleaseEmailData) -> String {
    let mut rows = String::new();
    rows.push_str(&detail_row(
        "Release Version",
        &release.release_version,
        " color: #0078d7; font-weight: bold;",
    ));
    rows.push_str(&detail_row("Account Name", &release.account_name, ""));
    rows.push_str(&detail_row("Region", or_not_specified(&release.region), ""));
    rows.push_str(&detail_row(
        "Release Date",
        &long_date(&release.release_date),
        " font-weight: bold;",
    ));
    rows.push_str(&detail_row("Executor", &release.executor, ""));
    rows.push_str(&detail_row(
        "Status",
        &release.status.to_uppercase(),
        &format!(" font-weight: bold; color: {};", status_color(&release.status)),
    ));

    let notes_block = if release.notes.is_empty() {
        String::new()
    } else {
        format!(
            concat!(
                r#"<table cellpadding="0" cellspacing="0" border="0" width="100%" style="margin-bottom: 25px;"><tr>"#,
                r#"<td style="background-color: #e9ecef; padding: 15px; border-left: 4px solid #0078d7;">"#,
                r#"<h3 style="margin: 0 0 10px 0; font-size: 16px; color: #0078d7;">NOTES</h3>"#,
                r#"<p style="margin: 0; font-size: 14px; white-space: pre-wrap;">{notes}</p>"#,
                "</td></tr></table>"
            ),
            notes = escape_html(&release.notes),
        )
    };

    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />"#,
            "<title>Release Notification</title></head>",
            r#"<body style="margin: 0; padding: 20px; background-color: #f5f5f5; font-family: Arial, Helvetica, sans-serif; font-size: 14px; color: #333333;">"#,
            r#"<table cellpadding="0" cellspacing="0" border="0" width="600" style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border: 2px solid #0078d7; border-radius: 8px;">"#,
            r#"<tr><td style="background-color: #0078d7; padding: 25px; text-align: center;">"#,
            r#"<h1 style="margin: 0; color: #ffffff; font-size: 24px;">RELEASE NOTIFICATION</h1>"#,
            r#"<h2 style="margin: 10px 0 0 0; color: #ffffff; font-size: 18px; font-weight: normal;">{version}</h2>"#,
            "</td></tr>",
            r#"<tr><td style="padding: 30px;">"#,
            r#"<p style="margin: 0 0 20px 0;">Dear <strong>Operations Team</strong>,</p>"#,
            r#"<p style="margin: 0 0 25px 0;">Please find the release details below:</p>"#,
            r#"<table cellpadding="0" cellspacing="0" border="0" width="100%" style="border: 2px solid #0078d7; border-collapse: collapse; margin-bottom: 25px;">"#,
            r#"<tr><td colspan="2" style="background-color: #0078d7; color: #ffffff; font-weight: bold; text-align: center; padding: 15px;">RELEASE DETAILS</td></tr>"#,
            "{rows}",
            "</table>",
            "{notes_block}",
            r#"<p style="margin: 0 0 20px 0;">Please ensure all necessary preparations are completed before the scheduled release date.</p>"#,
            r#"<p style="margin: 0;">For any questions or concerns, please contact the <strong>Release Management Team</strong>.</p>"#,
            "</td></tr>",
            r#"<tr><td style="background-color: #f8f9fa; padding: 20px; text-align: center; border-top: 1px solid #dee2e6;">"#,
            r#"<p style="margin: 0; font-size: 12px; color: #666666;">Release Planning System | Confidential</p>"#,
            r#"<p style="margin: 5px 0 0 0; font-size: 12px; color: #666666;">Generated on {generated}</p>"#,
            "</td></tr>",
            "</table></body></html>"
        ),
        version = escape_html(&release.release_version),
        rows = rows,
        notes_block = notes_block,
        generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Plain text alternative for a release notification.
pub fn release_text(release: &ReleaseEmailData) -> String {
    let notes_block = if release.notes.is_empty() {
        String::new()
    } else {
        format!("NOTES:\n{}\n\n", release.notes)
    };

    format!(
        "RELEASE NOTIFICATION - {version}\n\
         \n\
         Dear Operations Team,\n\
         \n\
         Please find the release details below:\n\
         \n\
         ==============================================\n\
         RELEASE DETAILS\n\
         ==============================================\n\
         \n\
         Release Version: {version}\n\
         Account Name: {account}\n\
         Region: {region}\n\
         Release Date: {date}\n\
         Executor: {executor}\n\
         Status: {status}\n\
         \n\
         {notes_block}\
         Please ensure all necessary preparations are completed before the scheduled release date.\n\
         \n\
         For any questions or concerns, please contact the Release Management Team.\n\
         \n\
         ==============================================\n\
         Release Planning System | Confidential\n\
         Generated on {generated}\n\
         ==============================================",
        version = release.release_version,
        account = release.account_name,
        region = or_not_specified(&release.region),
        date = long_date(&release.release_date),
        executor = release.executor,
        status = release.status.to_uppercase(),
        notes_block = notes_block,
        generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Minimal HTML wrapper for a free-form plain text body.
pub fn simple_html(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />"#,
            "<title>Email</title></head>",
            r#"<body style="margin: 0; padding: 20px; font-family: Arial, Helvetica, sans-serif; font-size: 14px; color: #333333; background-color: #f5f5f5;">"#,
            r#"<table cellpadding="0" cellspacing="0" border="0" width="100%" style="max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 20px; border-radius: 8px;">"#,
            "<tr><td>",
            r#"<pre style="font-family: Arial, Helvetica, sans-serif; white-space: pre-wrap; word-wrap: break-word; margin: 0;">{body}</pre>"#,
            "</td></tr></table></body></html>"
        ),
        body = escape_html(body),
    )
}
