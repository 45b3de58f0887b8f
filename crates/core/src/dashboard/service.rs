//! Dashboard aggregation service.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use scraptally_shared::types::PartyId;

use super::types::{
    DashboardSummary, MaterialTotals, MonthlyTotals, PartyTotal, StatusCounts,
};
use crate::payment::EffectiveStatus;
use crate::transaction::{Transaction, TransactionKind};

/// Month labels in fiscal order.
const MONTHS: [&str; 12] = [
    "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb", "Mar",
];

/// Service for dashboard aggregation.
pub struct DashboardService;

impl DashboardService {
    /// Summarizes one owner's bills (both directions, already fetched and
    /// filtered to the requested financial-year window).
    #[must_use]
    pub fn summarize(transactions: &[Transaction], now: DateTime<Utc>) -> DashboardSummary {
        let purchases: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Purchase)
            .collect();
        let sales: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Sale)
            .collect();

        let total_purchases: Decimal = purchases.iter().map(|t| t.total_amount).sum();
        let total_sales: Decimal = sales.iter().map(|t| t.total_amount).sum();
        let purchase_paid: Decimal = purchases.iter().map(|t| t.paid_amount()).sum();
        let sale_paid: Decimal = sales.iter().map(|t| t.paid_amount()).sum();

        DashboardSummary {
            total_purchases,
            total_sales,
            total_payables: total_purchases - purchase_paid,
            total_receivables: total_sales - sale_paid,
            profit: total_sales - total_purchases,
            purchase_count: purchases.len() as u64,
            sale_count: sales.len() as u64,
            monthly: Self::monthly(&purchases, &sales),
            material_wise: Self::material_wise(&purchases, &sales),
            top_parties: Self::top_parties(transactions),
            purchase_status: Self::status_counts(&purchases, now),
            sale_status: Self::status_counts(&sales, now),
        }
    }

    /// Twelve buckets in fiscal order. Bucketing is by month-of-year, not
    /// true chronological month; a multi-year window conflates years.
    fn monthly(purchases: &[&Transaction], sales: &[&Transaction]) -> Vec<MonthlyTotals> {
        MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let month_index = (i as u32 + 3) % 12;
                let month_total = |items: &[&Transaction]| -> Decimal {
                    items
                        .iter()
                        .filter(|t| t.bill_date.month0() == month_index)
                        .map(|t| t.total_amount)
                        .sum()
                };
                MonthlyTotals {
                    month: (*month).to_string(),
                    purchases: month_total(purchases),
                    sales: month_total(sales),
                }
            })
            .collect()
    }

    fn material_wise(purchases: &[&Transaction], sales: &[&Transaction]) -> Vec<MaterialTotals> {
        let mut materials: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for sale in sales {
            materials
                .entry(sale.material_type.clone())
                .or_default()
                .1 += sale.total_amount;
        }
        for purchase in purchases {
            materials
                .entry(purchase.material_type.clone())
                .or_default()
                .0 += purchase.total_amount;
        }

        materials
            .into_iter()
            .map(|(material, (purchase_sum, sale_sum))| MaterialTotals {
                material,
                purchases: purchase_sum,
                sales: sale_sum,
                profit: sale_sum - purchase_sum,
            })
            .collect()
    }

    fn top_parties(transactions: &[Transaction]) -> Vec<PartyTotal> {
        let mut parties: HashMap<PartyId, (String, Decimal)> = HashMap::new();
        for transaction in transactions {
            let entry = parties
                .entry(transaction.party.id)
                .or_insert_with(|| (transaction.party.name.clone(), Decimal::ZERO));
            entry.1 += transaction.total_amount;
        }

        let mut totals: Vec<PartyTotal> = parties
            .into_values()
            .map(|(name, total)| PartyTotal { name, total })
            .collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        totals.truncate(5);
        totals
    }

    fn status_counts(transactions: &[&Transaction], now: DateTime<Utc>) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for transaction in transactions {
            match transaction.effective_status(now) {
                EffectiveStatus::Paid => counts.paid += 1,
                EffectiveStatus::Partial => counts.partial += 1,
                EffectiveStatus::Pending => counts.pending += 1,
                EffectiveStatus::Overdue => counts.overdue += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gst::GstType;
    use crate::payment::{Payment, PaymentMode};
    use crate::transaction::{PartyRef, WeightUnit};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use scraptally_shared::types::{OwnerId, PaymentId, TransactionId};

    struct BillFixture<'a> {
        kind: TransactionKind,
        material: &'a str,
        party: &'a str,
        total: Decimal,
        paid: Decimal,
        bill_date: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
    }

    fn bill(owner: OwnerId, party_id: PartyId, fixture: &BillFixture<'_>) -> Transaction {
        let payments = if fixture.paid.is_zero() {
            Vec::new()
        } else {
            vec![Payment {
                id: PaymentId::new(),
                amount: fixture.paid,
                payment_date: fixture.bill_date,
                mode: PaymentMode::Cash,
                note: String::new(),
                reference: String::new(),
                created_at: fixture.bill_date,
            }]
        };
        Transaction {
            id: TransactionId::new(),
            kind: fixture.kind,
            bill_number: "INV-1".to_string(),
            party: PartyRef {
                id: party_id,
                name: fixture.party.to_string(),
                mobile: String::new(),
                gst_number: String::new(),
            },
            material_type: fixture.material.to_string(),
            weight: dec!(100),
            weight_unit: WeightUnit::Kg,
            rate_per_kg: dec!(50),
            taxable_amount: fixture.total,
            gst_type: GstType::None,
            gst_percent: dec!(0),
            cgst_amount: dec!(0),
            sgst_amount: dec!(0),
            igst_amount: dec!(0),
            total_gst_amount: dec!(0),
            total_amount: fixture.total,
            bill_date: fixture.bill_date,
            due_date: fixture.due_date,
            financial_year: "2025-2026".to_string(),
            attachment: None,
            payments,
            notes: String::new(),
            owner,
            created_at: fixture.bill_date,
            updated_at: fixture.bill_date,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn fixture(kind: TransactionKind, total: Decimal) -> BillFixture<'static> {
        BillFixture {
            kind,
            material: "Iron",
            party: "Sharma Metals",
            total,
            paid: dec!(0),
            bill_date: date(2025, 6, 15),
            due_date: None,
        }
    }

    #[test]
    fn test_totals_payables_receivables_profit() {
        let owner = OwnerId::new();
        let supplier = PartyId::new();
        let customer = PartyId::new();
        let now = Utc::now();

        let mut purchase = fixture(TransactionKind::Purchase, dec!(5000));
        purchase.paid = dec!(3000);
        let mut sale = fixture(TransactionKind::Sale, dec!(7000));
        sale.paid = dec!(7000);

        let transactions = vec![
            bill(owner, supplier, &purchase),
            bill(owner, customer, &sale),
        ];
        let summary = DashboardService::summarize(&transactions, now);

        assert_eq!(summary.total_purchases, dec!(5000));
        assert_eq!(summary.total_sales, dec!(7000));
        assert_eq!(summary.total_payables, dec!(2000));
        assert_eq!(summary.total_receivables, dec!(0));
        assert_eq!(summary.profit, dec!(2000));
        assert_eq!(summary.purchase_count, 1);
        assert_eq!(summary.sale_count, 1);
    }

    #[test]
    fn test_monthly_buckets_fiscal_order_and_year_conflation() {
        let owner = OwnerId::new();
        let party = PartyId::new();
        let now = Utc::now();

        // Two April bills from different calendar years share the first
        // bucket.
        let mut a = fixture(TransactionKind::Purchase, dec!(1000));
        a.bill_date = date(2024, 4, 10);
        let mut b = fixture(TransactionKind::Purchase, dec!(500));
        b.bill_date = date(2025, 4, 20);
        let mut c = fixture(TransactionKind::Sale, dec!(900));
        c.bill_date = date(2025, 3, 1);

        let transactions = vec![
            bill(owner, party, &a),
            bill(owner, party, &b),
            bill(owner, party, &c),
        ];
        let summary = DashboardService::summarize(&transactions, now);

        assert_eq!(summary.monthly.len(), 12);
        assert_eq!(summary.monthly[0].month, "Apr");
        assert_eq!(summary.monthly[0].purchases, dec!(1500));
        // March is the last fiscal bucket
        assert_eq!(summary.monthly[11].month, "Mar");
        assert_eq!(summary.monthly[11].sales, dec!(900));
    }

    #[test]
    fn test_material_grouping_is_case_sensitive() {
        let owner = OwnerId::new();
        let party = PartyId::new();
        let now = Utc::now();

        let mut upper = fixture(TransactionKind::Purchase, dec!(1000));
        upper.material = "Iron";
        let mut lower = fixture(TransactionKind::Purchase, dec!(700));
        lower.material = "iron";
        let mut sale = fixture(TransactionKind::Sale, dec!(1500));
        sale.material = "Iron";

        let transactions = vec![
            bill(owner, party, &upper),
            bill(owner, party, &lower),
            bill(owner, party, &sale),
        ];
        let summary = DashboardService::summarize(&transactions, now);

        assert_eq!(summary.material_wise.len(), 2);
        let iron = summary
            .material_wise
            .iter()
            .find(|m| m.material == "Iron")
            .unwrap();
        assert_eq!(iron.purchases, dec!(1000));
        assert_eq!(iron.sales, dec!(1500));
        assert_eq!(iron.profit, dec!(500));
    }

    #[test]
    fn test_top_parties_sorted_and_truncated_to_five() {
        let owner = OwnerId::new();
        let now = Utc::now();

        let mut transactions = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F"].into_iter().enumerate() {
            let mut s = fixture(TransactionKind::Sale, Decimal::from((i as u32 + 1) * 100));
            s.party = name;
            transactions.push(bill(owner, PartyId::new(), &s));
        }
        let summary = DashboardService::summarize(&transactions, now);

        assert_eq!(summary.top_parties.len(), 5);
        assert_eq!(summary.top_parties[0].name, "F");
        assert_eq!(summary.top_parties[0].total, dec!(600));
        // the smallest party fell off the list
        assert!(summary.top_parties.iter().all(|p| p.name != "A"));
    }

    #[test]
    fn test_party_totals_combine_both_directions() {
        let owner = OwnerId::new();
        let party = PartyId::new();
        let now = Utc::now();

        let transactions = vec![
            bill(owner, party, &fixture(TransactionKind::Purchase, dec!(1000))),
            bill(owner, party, &fixture(TransactionKind::Sale, dec!(2500))),
        ];
        let summary = DashboardService::summarize(&transactions, now);

        assert_eq!(summary.top_parties.len(), 1);
        assert_eq!(summary.top_parties[0].total, dec!(3500));
    }

    #[test]
    fn test_status_counts_with_overdue_precedence() {
        let owner = OwnerId::new();
        let party = PartyId::new();
        let now = Utc::now();
        let yesterday = now - chrono::Duration::days(1);

        let mut paid = fixture(TransactionKind::Purchase, dec!(1000));
        paid.paid = dec!(1000);
        paid.due_date = Some(yesterday);
        let mut overdue = fixture(TransactionKind::Purchase, dec!(1000));
        overdue.paid = dec!(400);
        overdue.due_date = Some(yesterday);
        let pending = fixture(TransactionKind::Purchase, dec!(1000));

        let transactions = vec![
            bill(owner, party, &paid),
            bill(owner, party, &overdue),
            bill(owner, party, &pending),
        ];
        let summary = DashboardService::summarize(&transactions, now);

        // a fully paid bill past its due date is Paid, not Overdue
        assert_eq!(
            summary.purchase_status,
            StatusCounts {
                paid: 1,
                partial: 0,
                pending: 1,
                overdue: 1,
            }
        );
        assert_eq!(summary.sale_status, StatusCounts::default());
    }
}
