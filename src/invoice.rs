//! Invoice data model and the fixed sample invoice used by every fixture.
//!
//! All amounts are carried as [`Decimal`] values rounded to two decimal places so that totals
//! printed into the PDF are exactly the products and sums a checker recomputes.

use chrono::{Days, Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Number of days between the issue date and the due date.
pub const PAYMENT_TERM_DAYS: u64 = 30;

/// Currency code printed next to every amount.
pub const CURRENCY: &str = "EUR";

/// Invoice number carried by the sample fixture.
pub const SAMPLE_INVOICE_NUMBER: &str = "FAC-2024-001234";

fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A company appearing on the invoice, either as issuer or as client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    name: String,
    address_lines: Vec<String>,
    siret: String,
    vat_number: Option<String>,
    phone: Option<String>,
}

impl Party {
    /// Creates a party with its legal name, postal address and SIRET number.
    pub fn new<I, S>(name: impl Into<String>, address_lines: I, siret: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            address_lines: address_lines.into_iter().map(Into::into).collect(),
            siret: siret.into(),
            vat_number: None,
            phone: None,
        }
    }

    /// Sets the intra-community VAT number and returns the updated party.
    pub fn with_vat_number(mut self, vat_number: impl Into<String>) -> Self {
        self.vat_number = Some(vat_number.into());
        self
    }

    /// Sets the phone number and returns the updated party.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address_lines(&self) -> &[String] {
        &self.address_lines
    }

    pub fn siret(&self) -> &str {
        &self.siret
    }

    pub fn vat_number(&self) -> Option<&str> {
        self.vat_number.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// A billed service line. The line total is derived once at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    description: String,
    quantity: u32,
    unit_price: Decimal,
    total: Decimal,
}

impl LineItem {
    /// Creates a line and computes `quantity × unit_price` rounded to cents.
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        let unit_price = round_amount(unit_price);
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: round_amount(Decimal::from(quantity) * unit_price),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Line amount before tax.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Totals derived from the line items and the VAT rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    /// Sum of the line totals ("Sous-total HT").
    pub subtotal: Decimal,
    /// VAT owed on the subtotal.
    pub tax: Decimal,
    /// Amount due including VAT ("TOTAL TTC").
    pub grand_total: Decimal,
}

impl Totals {
    fn compute(items: &[LineItem], tax_rate: Decimal) -> Self {
        let subtotal = round_amount(items.iter().map(LineItem::total).sum());
        let tax = round_amount(subtotal * tax_rate);
        Self {
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }
}

/// A complete invoice. Built once from literals and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    number: String,
    issuer: Party,
    client: Party,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    items: Vec<LineItem>,
    tax_rate: Decimal,
    totals: Totals,
    payment_method: String,
}

impl Invoice {
    /// Assembles an invoice and derives its due date and totals.
    ///
    /// The due date is `issue_date` plus [`PAYMENT_TERM_DAYS`]; it only falls back to the issue
    /// date when that addition would overflow the calendar range supported by `chrono`.
    pub fn new(
        number: impl Into<String>,
        issuer: Party,
        client: Party,
        issue_date: NaiveDate,
        items: Vec<LineItem>,
        tax_rate: Decimal,
    ) -> Self {
        let due_date = issue_date
            .checked_add_days(Days::new(PAYMENT_TERM_DAYS))
            .unwrap_or(issue_date);
        let totals = Totals::compute(&items, tax_rate);

        Self {
            number: number.into(),
            issuer,
            client,
            issue_date,
            due_date,
            items,
            tax_rate,
            totals,
            payment_method: "Virement bancaire".to_owned(),
        }
    }

    /// The fixed sample invoice consumed by the compliance checker tests.
    pub fn sample(issue_date: NaiveDate) -> Self {
        let issuer = Party::new(
            "TECH SOLUTIONS SARL",
            ["123 Avenue des Champs-Élysées", "75008 Paris, France"],
            "12345678901234",
        )
        .with_vat_number("FR12345678901")
        .with_phone("01 42 86 83 26");

        let client = Party::new(
            "CLIENT ENTREPRISE SAS",
            ["456 Avenue des Clients", "69000 Lyon, France"],
            "98765432109876",
        );

        let items = vec![
            LineItem::new("Développement site web", 1, dec!(1000.00)),
            LineItem::new("Maintenance mensuelle", 3, dec!(150.00)),
            LineItem::new("Formation utilisateurs", 2, dec!(200.00)),
        ];

        Self::new(
            SAMPLE_INVOICE_NUMBER,
            issuer,
            client,
            issue_date,
            items,
            dec!(0.20),
        )
    }

    /// The sample invoice issued on the current local date.
    pub fn sample_today() -> Self {
        Self::sample(Local::now().date_naive())
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issuer(&self) -> &Party {
        &self.issuer
    }

    pub fn client(&self) -> &Party {
        &self.client
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// VAT rate as a fraction (`0.20` for 20%).
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    /// Payment terms as printed on the document, e.g. `30 jours`.
    pub fn payment_terms(&self) -> String {
        format!("{} jours", PAYMENT_TERM_DAYS)
    }
}

/// Formats an amount with two decimals followed by the currency, e.g. `1850.00 EUR`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2} {}", amount, CURRENCY)
}

/// Formats a date the way French invoices print it (`14/02/2024`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a fractional rate as a whole percentage, e.g. `0.20` as `20%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{format_amount, format_date, format_rate, Invoice, LineItem};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn sample_totals_match_the_expected_fixture_values() {
        let invoice = Invoice::sample(date(2024, 3, 1));
        let totals = invoice.totals();

        assert_eq!(totals.subtotal, dec!(1850.00));
        assert_eq!(totals.tax, dec!(370.00));
        assert_eq!(totals.grand_total, dec!(2220.00));
        assert_eq!(format_amount(totals.subtotal), "1850.00 EUR");
        assert_eq!(format_amount(totals.tax), "370.00 EUR");
        assert_eq!(format_amount(totals.grand_total), "2220.00 EUR");
    }

    #[test]
    fn grand_total_applies_the_tax_rate_to_the_subtotal() {
        let invoice = Invoice::sample(date(2024, 3, 1));
        let totals = invoice.totals();
        let summed: Decimal = invoice.items().iter().map(LineItem::total).sum();

        assert_eq!(totals.subtotal, summed);
        assert_eq!(
            totals.grand_total,
            totals.subtotal * (Decimal::ONE + invoice.tax_rate())
        );
    }

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        let item = LineItem::new("Maintenance mensuelle", 3, dec!(150));
        assert_eq!(item.total(), dec!(450.00));
        assert_eq!(format!("{:.2}", item.unit_price()), "150.00");

        let odd = LineItem::new("Heures", 3, dec!(33.335));
        assert_eq!(odd.unit_price(), dec!(33.34));
        assert_eq!(odd.total(), dec!(100.02));
    }

    #[test]
    fn due_date_rolls_over_month_boundaries() {
        let invoice = Invoice::sample(date(2024, 1, 15));
        assert_eq!(invoice.due_date(), date(2024, 2, 14));
        assert_eq!(format_date(invoice.due_date()), "14/02/2024");
    }

    #[test]
    fn due_date_rolls_over_year_and_leap_day() {
        assert_eq!(
            Invoice::sample(date(2024, 12, 15)).due_date(),
            date(2025, 1, 14)
        );
        assert_eq!(
            Invoice::sample(date(2024, 2, 1)).due_date(),
            date(2024, 3, 2)
        );
        assert_eq!(
            Invoice::sample(date(2023, 2, 1)).due_date(),
            date(2023, 3, 3)
        );
    }

    #[test]
    fn due_date_is_always_thirty_days_after_issue() {
        let mut issue = date(2023, 1, 1);
        while issue < date(2025, 1, 1) {
            let invoice = Invoice::sample(issue);
            assert_eq!((invoice.due_date() - invoice.issue_date()).num_days(), 30);
            issue = issue.succ_opt().expect("next day");
        }
    }

    #[test]
    fn sample_identities_are_fixed() {
        let invoice = Invoice::sample(date(2024, 3, 1));
        assert_eq!(invoice.number(), "FAC-2024-001234");
        assert_eq!(invoice.issuer().name(), "TECH SOLUTIONS SARL");
        assert_eq!(invoice.issuer().siret(), "12345678901234");
        assert_eq!(invoice.issuer().vat_number(), Some("FR12345678901"));
        assert_eq!(invoice.client().name(), "CLIENT ENTREPRISE SAS");
        assert_eq!(invoice.client().siret(), "98765432109876");
        assert_eq!(invoice.client().vat_number(), None);
        assert_eq!(invoice.payment_terms(), "30 jours");
    }

    #[test]
    fn rate_is_printed_as_whole_percent() {
        assert_eq!(format_rate(dec!(0.20)), "20%");
        assert_eq!(format_rate(dec!(0.055)), "5.5%");
    }
}
