//! Turns an [`Invoice`] into the ordered document blocks rendered by both pipelines.

use crate::invoice::{format_amount, format_date, format_rate, Invoice, Party};
use crate::model::{Block, Column, HorizontalAlignment, Table, TextLevel, TextLine, TotalRow};
use crate::richtext::Span;

/// Document title, also printed as the running header of the cell pipeline.
pub const TITLE: &str = "FACTURE";

/// Fixed legal notices required on French B2B invoices.
pub const LEGAL_NOTICES: [&str; 3] = [
    "En cas de retard de paiement, seront exigibles une indemnité de 40 EUR pour frais de recouvrement",
    "et des intérêts de retard au taux de 10% (art. L441-6 du Code de commerce).",
    "Aucun escompte pour paiement anticipé.",
];

/// Builds every block of the invoice. The title is included only when `with_title` is set, as
/// the cell pipeline prints it through its page header instead.
pub fn invoice_blocks(invoice: &Invoice, with_title: bool) -> Vec<Block> {
    let mut blocks = Vec::new();

    if with_title {
        blocks.push(Block::Line(
            TextLine::plain(TITLE)
                .with_level(TextLevel::Title)
                .with_alignment(HorizontalAlignment::Center),
        ));
        blocks.push(Block::spacer(1.0));
    }

    blocks.extend(issuer_blocks(invoice.issuer()));
    blocks.push(Block::spacer(1.0));
    blocks.extend(metadata_blocks(invoice));
    blocks.push(Block::spacer(1.0));
    blocks.extend(client_blocks(invoice.client()));
    blocks.push(Block::spacer(1.0));
    blocks.push(Block::Table(item_table(invoice)));
    blocks.push(Block::spacer(0.5));
    blocks.push(Block::Totals(total_rows(invoice)));
    blocks.push(Block::spacer(1.0));
    blocks.push(Block::line(vec![
        Span::new("Conditions de paiement:").bold(),
        Span::new(format!(" {}", invoice.payment_terms())),
    ]));
    blocks.push(Block::line(vec![
        Span::new("Mode de paiement:").bold(),
        Span::new(format!(" {}", invoice.payment_method())),
    ]));
    blocks.push(Block::spacer(0.5));
    blocks.extend(LEGAL_NOTICES.iter().map(|notice| {
        Block::Line(TextLine::new(vec![Span::new(*notice).italic()]).with_level(TextLevel::Fine))
    }));

    blocks
}

fn heading(spans: Vec<Span>) -> Block {
    Block::Line(TextLine::new(spans).with_level(TextLevel::Heading))
}

fn issuer_blocks(issuer: &Party) -> Vec<Block> {
    let mut blocks = vec![heading(vec![Span::new(issuer.name()).bold()])];
    blocks.extend(issuer.address_lines().iter().map(|line| Block::plain(line.as_str())));
    blocks.push(Block::plain(format!("SIRET: {}", issuer.siret())));
    if let Some(vat) = issuer.vat_number() {
        blocks.push(Block::plain(format!("TVA: {}", vat)));
    }
    if let Some(phone) = issuer.phone() {
        blocks.push(Block::plain(format!("Tél: {}", phone)));
    }
    blocks
}

fn metadata_blocks(invoice: &Invoice) -> Vec<Block> {
    vec![
        heading(vec![Span::new(format!("FACTURE N° {}", invoice.number())).bold()]),
        Block::plain(format!("Date: {}", format_date(invoice.issue_date()))),
        Block::plain(format!(
            "Date d'échéance: {}",
            format_date(invoice.due_date())
        )),
    ]
}

fn client_blocks(client: &Party) -> Vec<Block> {
    let mut blocks = vec![
        heading(vec![Span::new("FACTURÉ À:").bold()]),
        Block::plain(client.name()),
    ];
    blocks.extend(client.address_lines().iter().map(|line| Block::plain(line.as_str())));
    blocks.push(Block::plain(format!("SIRET: {}", client.siret())));
    if let Some(vat) = client.vat_number() {
        blocks.push(Block::plain(format!("TVA: {}", vat)));
    }
    blocks
}

fn item_table(invoice: &Invoice) -> Table {
    let columns = vec![
        Column::new("Description", 52, HorizontalAlignment::Left),
        Column::new("Qté", 12, HorizontalAlignment::Center),
        Column::new("Prix unitaire", 18, HorizontalAlignment::Right),
        Column::new("Total HT", 18, HorizontalAlignment::Right),
    ];

    invoice
        .items()
        .iter()
        .fold(Table::new(columns), |table, item| {
            table.with_row([
                item.description().to_owned(),
                item.quantity().to_string(),
                format_amount(item.unit_price()),
                format_amount(item.total()),
            ])
        })
}

fn total_rows(invoice: &Invoice) -> Vec<TotalRow> {
    let totals = invoice.totals();
    vec![
        TotalRow::new("Sous-total HT:", format_amount(totals.subtotal)),
        TotalRow::new(
            format!("TVA ({}):", format_rate(invoice.tax_rate())),
            format_amount(totals.tax),
        ),
        TotalRow::new("TOTAL TTC:", format_amount(totals.grand_total)).emphasized(),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{invoice_blocks, LEGAL_NOTICES, TITLE};
    use crate::invoice::Invoice;
    use crate::model::{Block, TextLevel};

    fn sample() -> Invoice {
        Invoice::sample(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"))
    }

    fn all_text(blocks: &[Block]) -> String {
        blocks
            .iter()
            .flat_map(Block::texts)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn blocks_carry_every_required_field() {
        let text = all_text(&invoice_blocks(&sample(), true));
        for needle in [
            "TECH SOLUTIONS SARL",
            "12345678901234",
            "FR12345678901",
            "CLIENT ENTREPRISE SAS",
            "98765432109876",
            "FAC-2024-001234",
            "1850.00",
            "370.00",
            "2220.00",
            "30 jours",
            "15/01/2024",
            "14/02/2024",
            "TVA (20%):",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
        }
    }

    #[test]
    fn title_is_optional() {
        let invoice = sample();
        let with_title = invoice_blocks(&invoice, true);
        let without_title = invoice_blocks(&invoice, false);

        assert!(matches!(
            with_title.first(),
            Some(Block::Line(line)) if line.text() == TITLE && line.level() == TextLevel::Title
        ));
        assert_eq!(with_title.len(), without_title.len() + 2);
    }

    #[test]
    fn document_ends_with_the_legal_notices() {
        let blocks = invoice_blocks(&sample(), false);
        let tail: Vec<String> = blocks[blocks.len() - 3..]
            .iter()
            .flat_map(Block::texts)
            .collect();
        assert_eq!(tail, LEGAL_NOTICES);
    }

    #[test]
    fn only_the_grand_total_is_emphasized() {
        let blocks = invoice_blocks(&sample(), false);
        let totals = blocks
            .iter()
            .find_map(|block| match block {
                Block::Totals(rows) => Some(rows),
                _ => None,
            })
            .expect("totals block");

        let emphasized: Vec<_> = totals.iter().filter(|row| row.emphasized).collect();
        assert_eq!(emphasized.len(), 1);
        assert_eq!(emphasized[0].amount, "2220.00 EUR");
    }
}
