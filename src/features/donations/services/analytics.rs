//! Pure donation analytics.
//!
//! Every function here is synchronous and operates on donation rows already
//! fetched and joined with their charity display fields. Amounts stay in
//! integer minor units throughout; formatting happens only at the edges
//! (CSV export, response DTOs).

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::donations::models::DonationWithCharity;
use crate::shared::currency::format_amount;

/// An accumulated per-charity total, keyed by charity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharityTotal {
    pub charity_id: Uuid,
    pub name: String,
    pub amount_cents: i64,
}

/// One calendar-month bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub month_label: String,
    pub amount_cents: i64,
}

/// Parse a donor-entered major-unit amount ("25.5") into minor units (2550).
/// The amount must be a positive number; anything rounding to zero cents or
/// below is rejected before any write occurs.
pub fn parse_donation_amount(input: &str) -> Result<i64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Please enter a valid amount".to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(
            "Please enter a valid amount".to_string(),
        ));
    }

    let cents = (amount * 100.0).round() as i64;
    if cents <= 0 {
        return Err(AppError::Validation(
            "Please enter a valid amount".to_string(),
        ));
    }

    Ok(cents)
}

/// Sum of all donation amounts; zero for an empty list.
pub fn total_amount(donations: &[DonationWithCharity]) -> i64 {
    donations.iter().map(|d| d.amount_cents).sum()
}

/// Accumulate amounts per distinct charity, preserving the first-seen
/// display name and encounter order of the charities.
pub fn count_by_charity(donations: &[DonationWithCharity]) -> Vec<CharityTotal> {
    let mut totals: Vec<CharityTotal> = Vec::new();

    for donation in donations {
        match totals.iter_mut().find(|t| t.charity_id == donation.charity_id) {
            Some(entry) => entry.amount_cents += donation.amount_cents,
            None => totals.push(CharityTotal {
                charity_id: donation.charity_id,
                name: donation.charity_name.clone(),
                amount_cents: donation.amount_cents,
            }),
        }
    }

    totals
}

/// Top `n` charities by accumulated amount, descending. The sort is stable,
/// so equal amounts keep their encounter order.
pub fn top_charities(donations: &[DonationWithCharity], n: usize) -> Vec<CharityTotal> {
    let mut totals = count_by_charity(donations);
    totals.sort_by(|a, b| b.amount_cents.cmp(&a.amount_cents));
    totals.truncate(n);
    totals
}

/// Bucket donations by calendar year-month of `donated_at`: exactly
/// `months_back` buckets ending at the month containing `reference`, oldest
/// first, zero-filled. Month membership uses the timestamp's own year and
/// month, never elapsed-day arithmetic.
pub fn monthly_totals(
    donations: &[DonationWithCharity],
    reference: NaiveDate,
    months_back: usize,
) -> Vec<MonthlyTotal> {
    if months_back == 0 {
        return Vec::new();
    }

    let end_index = month_index(reference.year(), reference.month());
    let start_index = end_index - (months_back as i32 - 1);

    let mut amounts = vec![0i64; months_back];
    for donation in donations {
        let date = donation.donated_at.date_naive();
        let index = month_index(date.year(), date.month());
        if index >= start_index && index <= end_index {
            amounts[(index - start_index) as usize] += donation.amount_cents;
        }
    }

    amounts
        .into_iter()
        .enumerate()
        .map(|(offset, amount_cents)| {
            let index = start_index + offset as i32;
            MonthlyTotal {
                month_label: month_label(index),
                amount_cents,
            }
        })
        .collect()
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

fn month_label(index: i32) -> String {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    // First of the month always exists
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid month index")
        .format("%b %Y")
        .to_string()
}

/// The tax year containing `reference`, South African convention:
/// March 1 through the last day of the following February.
pub fn tax_year_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_year = if reference.month() <= 2 {
        reference.year() - 1
    } else {
        reference.year()
    };

    let start = NaiveDate::from_ymd_opt(start_year, 3, 1).expect("March 1 always exists");
    let end = NaiveDate::from_ymd_opt(start_year + 1, 3, 1)
        .expect("March 1 always exists")
        .pred_opt()
        .expect("day before March 1 always exists");

    (start, end)
}

/// Sum of donations falling inside the tax year containing `reference`,
/// inclusive on both ends at day granularity.
pub fn tax_year_total(donations: &[DonationWithCharity], reference: NaiveDate) -> i64 {
    let (start, end) = tax_year_window(reference);

    donations
        .iter()
        .filter(|d| {
            let date = d.donated_at.date_naive();
            date >= start && date <= end
        })
        .map(|d| d.amount_cents)
        .sum()
}

/// Keep donations matching the charity (if given) and the calendar year of
/// `donated_at` (if given); both filters AND-combined.
pub fn filter_donations(
    donations: &[DonationWithCharity],
    charity_id: Option<Uuid>,
    year: Option<i32>,
) -> Vec<DonationWithCharity> {
    donations
        .iter()
        .filter(|d| charity_id.is_none_or(|id| d.charity_id == id))
        .filter(|d| year.is_none_or(|y| d.donated_at.date_naive().year() == y))
        .cloned()
        .collect()
}

/// Render donations as CSV in input order.
///
/// Header: `Date,Charity,Amount,Currency,Message`. The date is the locale
/// short form ("Jan 5, 2024") and is deliberately left unquoted to match the
/// established export format; charity and message are quoted with internal
/// quotes doubled.
pub fn to_csv(donations: &[DonationWithCharity]) -> String {
    let mut out = String::from("Date,Charity,Amount,Currency,Message\n");

    for donation in donations {
        let date = donation.donated_at.date_naive().format("%b %-d, %Y");
        let amount = format_amount(donation.amount_cents, donation.currency);
        let message = donation.message.as_deref().unwrap_or("");

        out.push_str(&format!(
            "{},{},{},{},{}\n",
            date,
            csv_quote(&donation.charity_name),
            amount,
            donation.currency,
            csv_quote(message),
        ));
    }

    out
}

fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::donations::models::DonationStatus;
    use crate::shared::currency::Currency;
    use chrono::{TimeZone, Utc};

    fn donation(
        charity_id: Uuid,
        charity_name: &str,
        amount_cents: i64,
        date: (i32, u32, u32),
    ) -> DonationWithCharity {
        DonationWithCharity {
            donation_id: Uuid::new_v4(),
            amount_cents,
            currency: Currency::USD,
            status: DonationStatus::Paid,
            message: None,
            donated_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 12, 0, 0)
                .unwrap(),
            charity_id,
            charity_name: charity_name.to_string(),
            charity_photo_url: None,
        }
    }

    #[test]
    fn test_parse_donation_amount() {
        assert_eq!(parse_donation_amount("25.5").unwrap(), 2550);
        assert_eq!(parse_donation_amount("25").unwrap(), 2500);
        assert_eq!(parse_donation_amount(" 0.01 ").unwrap(), 1);
    }

    #[test]
    fn test_parse_donation_amount_rejects_non_positive() {
        assert!(parse_donation_amount("0").is_err());
        assert!(parse_donation_amount("-5").is_err());
        assert!(parse_donation_amount("0.001").is_err());
        assert!(parse_donation_amount("abc").is_err());
        assert!(parse_donation_amount("").is_err());
        assert!(parse_donation_amount("NaN").is_err());
        assert!(parse_donation_amount("inf").is_err());
    }

    #[test]
    fn test_total_amount() {
        let a = Uuid::new_v4();
        assert_eq!(total_amount(&[]), 0);
        let list = vec![
            donation(a, "Acme", 1000, (2024, 1, 5)),
            donation(a, "Acme", 2500, (2024, 2, 5)),
        ];
        assert_eq!(total_amount(&list), 3500);
    }

    #[test]
    fn test_count_by_charity_preserves_first_seen_name_and_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let list = vec![
            donation(a, "Acme", 1000, (2024, 1, 5)),
            donation(b, "Beacon", 500, (2024, 1, 6)),
            donation(a, "Acme Renamed", 250, (2024, 1, 7)),
        ];

        let totals = count_by_charity(&list);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].charity_id, a);
        assert_eq!(totals[0].name, "Acme");
        assert_eq!(totals[0].amount_cents, 1250);
        assert_eq!(totals[1].charity_id, b);
        assert_eq!(totals[1].amount_cents, 500);
    }

    #[test]
    fn test_top_charities_sorted_and_truncated() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let list = vec![
            donation(ids[0], "A", 100, (2024, 1, 1)),
            donation(ids[1], "B", 400, (2024, 1, 2)),
            donation(ids[2], "C", 200, (2024, 1, 3)),
            donation(ids[3], "D", 300, (2024, 1, 4)),
        ];

        let top = top_charities(&list, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "B");
        assert_eq!(top[1].name, "D");
        assert_eq!(top[2].name, "C");
    }

    #[test]
    fn test_top_charities_stable_on_ties() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let list = vec![
            donation(a, "First", 100, (2024, 1, 1)),
            donation(b, "Second", 100, (2024, 1, 2)),
        ];

        let top = top_charities(&list, 5);
        assert_eq!(top[0].name, "First");
        assert_eq!(top[1].name, "Second");
    }

    #[test]
    fn test_top_charities_with_fewer_than_n() {
        let a = Uuid::new_v4();
        let list = vec![donation(a, "Only", 100, (2024, 1, 1))];
        assert_eq!(top_charities(&list, 5).len(), 1);
        assert!(top_charities(&[], 5).is_empty());
    }

    #[test]
    fn test_monthly_totals_bucket_count_and_order() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let buckets = monthly_totals(&[], reference, 6);

        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].month_label, "Jan 2024");
        assert_eq!(buckets[5].month_label, "Jun 2024");
        assert!(buckets.iter().all(|b| b.amount_cents == 0));
    }

    #[test]
    fn test_monthly_totals_assigns_by_calendar_month() {
        let a = Uuid::new_v4();
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let list = vec![
            // Jan 31 must land in the January bucket, not drift into
            // February via day arithmetic
            donation(a, "Acme", 100, (2024, 1, 31)),
            donation(a, "Acme", 200, (2024, 6, 1)),
            donation(a, "Acme", 400, (2024, 6, 30)),
            // Outside the window
            donation(a, "Acme", 800, (2023, 12, 31)),
        ];

        let buckets = monthly_totals(&list, reference, 6);
        assert_eq!(buckets[0].amount_cents, 100);
        assert_eq!(buckets[5].amount_cents, 600);
        assert_eq!(
            buckets.iter().map(|b| b.amount_cents).sum::<i64>(),
            700
        );
    }

    #[test]
    fn test_monthly_totals_window_spans_year_boundary() {
        let reference = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let buckets = monthly_totals(&[], reference, 6);
        assert_eq!(buckets[0].month_label, "Sep 2023");
        assert_eq!(buckets[5].month_label, "Feb 2024");
    }

    #[test]
    fn test_monthly_totals_in_window_sums_match_total() {
        let a = Uuid::new_v4();
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let list = vec![
            donation(a, "Acme", 150, (2024, 2, 1)),
            donation(a, "Acme", 250, (2024, 4, 11)),
            donation(a, "Acme", 350, (2024, 6, 15)),
        ];

        let buckets = monthly_totals(&list, reference, 6);
        assert_eq!(
            buckets.iter().map(|b| b.amount_cents).sum::<i64>(),
            total_amount(&list)
        );
    }

    #[test]
    fn test_tax_year_window_mid_year_reference() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = tax_year_window(reference);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_tax_year_window_jan_feb_reference() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let (start, end) = tax_year_window(reference);
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        // 2024 is a leap year
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_tax_year_boundaries() {
        let a = Uuid::new_v4();
        // Feb 28 belongs to the tax year ending that February; Mar 1 of the
        // same calendar year opens the next one
        let feb_28 = donation(a, "Acme", 100, (2023, 2, 28));
        let mar_1 = donation(a, "Acme", 200, (2023, 3, 1));

        let reference_old_year = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let reference_new_year = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();

        let list = vec![feb_28, mar_1];
        assert_eq!(tax_year_total(&list, reference_old_year), 100);
        assert_eq!(tax_year_total(&list, reference_new_year), 200);
    }

    #[test]
    fn test_tax_year_total_spec_scenario() {
        let a = Uuid::new_v4();
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let excluded = donation(a, "Acme", 100, (2024, 2, 15));
        let included = donation(a, "Acme", 200, (2024, 3, 1));

        assert_eq!(tax_year_total(&[excluded, included], reference), 200);
    }

    #[test]
    fn test_filter_donations() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let list = vec![
            donation(a, "Acme", 100, (2023, 5, 1)),
            donation(a, "Acme", 200, (2024, 5, 1)),
            donation(b, "Beacon", 400, (2024, 5, 1)),
        ];

        assert_eq!(filter_donations(&list, None, None).len(), 3);
        assert_eq!(filter_donations(&list, Some(a), None).len(), 2);
        assert_eq!(filter_donations(&list, None, Some(2024)).len(), 2);

        let both = filter_donations(&list, Some(a), Some(2024));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].amount_cents, 200);
    }

    #[test]
    fn test_to_csv_escapes_and_formats() {
        let a = Uuid::new_v4();
        let mut d = donation(a, "Acme", 2500, (2024, 1, 5));
        d.message = Some("Say \"hi\"".to_string());

        let csv = to_csv(&[d]);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Date,Charity,Amount,Currency,Message");
        assert_eq!(
            lines.next().unwrap(),
            "Jan 5, 2024,\"Acme\",$25.00,USD,\"Say \"\"hi\"\"\""
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_totals_agree_over_generated_history() {
        use fake::faker::company::en::CompanyName;
        use fake::Fake;

        let charities: Vec<(Uuid, String)> = (0..4)
            .map(|_| (Uuid::new_v4(), CompanyName().fake()))
            .collect();

        let mut list = Vec::new();
        for (i, (id, name)) in charities.iter().cycle().take(40).enumerate() {
            let amount = ((7..500).fake::<i64>()) * 10;
            let month = (i % 12) as u32 + 1;
            list.push(donation(*id, name, amount, (2024, month, 15)));
        }

        let by_charity = count_by_charity(&list);
        assert_eq!(by_charity.len(), charities.len());
        assert_eq!(
            by_charity.iter().map(|t| t.amount_cents).sum::<i64>(),
            total_amount(&list)
        );

        let buckets = monthly_totals(
            &list,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            12,
        );
        assert_eq!(
            buckets.iter().map(|b| b.amount_cents).sum::<i64>(),
            total_amount(&list)
        );
    }

    #[test]
    fn test_to_csv_empty_message_and_list() {
        let a = Uuid::new_v4();
        let d = donation(a, "Acme", 123456, (2024, 12, 25));
        let csv = to_csv(&[d]);
        assert!(csv.ends_with("Dec 25, 2024,\"Acme\",$1,234.56,USD,\"\"\n"));

        assert_eq!(to_csv(&[]), "Date,Charity,Amount,Currency,Message\n");
    }
}
