//! Typed aggregation pipeline for the sales reports.
//!
//! Each report builds an ordered list of [`Stage`] descriptors and runs it
//! over rows loaded through the repositories, so the stage sequence stays
//! inspectable and unit-testable without a store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{OrderRecord, ProductRecord, VendorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Month label (`YYYY-MM`); lexicographic order is chronological.
    Label,
    Total,
    Code,
    Name,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub enum Stage {
    /// Expand every order into one row per cart line.
    FlattenCartLines,
    /// Attach the catalog product to each line; lines whose product id does
    /// not resolve are dropped.
    JoinProducts,
    /// Keep lines whose joined product belongs to the given vendor.
    MatchVendor(VendorId),
    /// Keep lines whose order carries a payment timestamp.
    MatchPaid,
    /// Per-line sales volume: `item_count * quantity`.
    ComputeVolume,
    /// Group lines by the `YYYY-MM` month of the payment timestamp, summing
    /// volume. Lines without a payment timestamp contribute nothing.
    GroupByMonth,
    /// Group lines by product id, summing volume and carrying the first-seen
    /// catalog name.
    GroupByProduct,
    /// Split the carried catalog name on `-` into trimmed code / name /
    /// color. Color defaults to `-` when the name has fewer than three
    /// segments; segments past the third are ignored.
    DecomposeName,
    /// Keep grouped rows whose code or name contains the needle,
    /// case-insensitively.
    Search(String),
    /// Stable sort, so ties keep their insertion order.
    Sort(SortKey, SortDirection),
    Skip(usize),
    Limit(usize),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::FlattenCartLines => "flatten_cart_lines",
            Stage::JoinProducts => "join_products",
            Stage::MatchVendor(_) => "match_vendor",
            Stage::MatchPaid => "match_paid",
            Stage::ComputeVolume => "compute_volume",
            Stage::GroupByMonth => "group_by_month",
            Stage::GroupByProduct => "group_by_product",
            Stage::DecomposeName => "decompose_name",
            Stage::Search(_) => "search",
            Stage::Sort(_, _) => "sort",
            Stage::Skip(_) => "skip",
            Stage::Limit(_) => "limit",
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stage `{stage}` cannot consume `{rows}` rows")]
    StageMismatch {
        stage: &'static str,
        rows: &'static str,
    },
    #[error("pipeline finished without producing grouped rows")]
    NotGrouped,
}

/// Rows the pipeline reads; loaded through the repositories before a run.
#[derive(Debug, Default)]
pub struct PipelineInput {
    pub orders: Vec<OrderRecord>,
    pub products: Vec<ProductRecord>,
}

/// One grouped result row. For the monthly report only `key` (the month
/// label) and `total` are meaningful; the product report fills the
/// decomposed name fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRow {
    pub key: String,
    pub code: String,
    pub name: String,
    pub color: String,
    pub total: i64,
}

#[derive(Debug, Clone)]
struct LineRow {
    payment_at: Option<DateTime<Utc>>,
    product_id: String,
    item_count: i64,
    quantity: i64,
    product: Option<ProductRecord>,
    volume: i64,
}

enum RowSet {
    /// Nothing consumed yet; the next stage reads from the input.
    Source,
    Lines(Vec<LineRow>),
    Groups(Vec<GroupRow>),
}

impl RowSet {
    fn name(&self) -> &'static str {
        match self {
            RowSet::Source => "source",
            RowSet::Lines(_) => "lines",
            RowSet::Groups(_) => "groups",
        }
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn run(&self, input: &PipelineInput) -> Result<Vec<GroupRow>, PipelineError> {
        let catalog: HashMap<&str, &ProductRecord> = input
            .products
            .iter()
            .map(|p| (p.id.as_str(), p))
            .collect();

        let mut rows = RowSet::Source;
        for stage in &self.stages {
            rows = apply(stage, rows, input, &catalog)?;
        }

        match rows {
            RowSet::Groups(groups) => Ok(groups),
            _ => Err(PipelineError::NotGrouped),
        }
    }
}

fn apply(
    stage: &Stage,
    rows: RowSet,
    input: &PipelineInput,
    catalog: &HashMap<&str, &ProductRecord>,
) -> Result<RowSet, PipelineError> {
    match (stage, rows) {
        (Stage::FlattenCartLines, RowSet::Source) => {
            let mut lines = Vec::new();
            for order in &input.orders {
                for line in &order.lines {
                    lines.push(LineRow {
                        payment_at: order.payment_at,
                        product_id: line.product_id.clone(),
                        item_count: line.item_count,
                        quantity: line.quantity,
                        product: None,
                        volume: 0,
                    });
                }
            }
            Ok(RowSet::Lines(lines))
        }
        (Stage::JoinProducts, RowSet::Lines(lines)) => {
            let joined = lines
                .into_iter()
                .filter_map(|mut line| {
                    let product = catalog.get(line.product_id.as_str())?;
                    line.product = Some((*product).clone());
                    Some(line)
                })
                .collect();
            Ok(RowSet::Lines(joined))
        }
        (Stage::MatchVendor(vendor_id), RowSet::Lines(mut lines)) => {
            lines.retain(|line| {
                line.product
                    .as_ref()
                    .is_some_and(|p| p.vendor_id == vendor_id.as_str())
            });
            Ok(RowSet::Lines(lines))
        }
        (Stage::MatchPaid, RowSet::Lines(mut lines)) => {
            lines.retain(|line| line.payment_at.is_some());
            Ok(RowSet::Lines(lines))
        }
        (Stage::ComputeVolume, RowSet::Lines(mut lines)) => {
            for line in &mut lines {
                line.volume = line.item_count * line.quantity;
            }
            Ok(RowSet::Lines(lines))
        }
        (Stage::GroupByMonth, RowSet::Lines(lines)) => {
            let mut index: HashMap<String, usize> = HashMap::new();
            let mut groups: Vec<GroupRow> = Vec::new();
            for line in lines {
                let Some(paid_at) = line.payment_at else {
                    continue;
                };
                let key = paid_at.format("%Y-%m").to_string();
                match index.get(&key) {
                    Some(&at) => groups[at].total += line.volume,
                    None => {
                        index.insert(key.clone(), groups.len());
                        groups.push(GroupRow {
                            key,
                            total: line.volume,
                            ..GroupRow::default()
                        });
                    }
                }
            }
            Ok(RowSet::Groups(groups))
        }
        (Stage::GroupByProduct, RowSet::Lines(lines)) => {
            let mut index: HashMap<String, usize> = HashMap::new();
            let mut groups: Vec<GroupRow> = Vec::new();
            for line in lines {
                match index.get(&line.product_id) {
                    Some(&at) => groups[at].total += line.volume,
                    None => {
                        index.insert(line.product_id.clone(), groups.len());
                        groups.push(GroupRow {
                            key: line.product_id.clone(),
                            name: line
                                .product
                                .as_ref()
                                .map(|p| p.name.clone())
                                .unwrap_or_default(),
                            total: line.volume,
                            ..GroupRow::default()
                        });
                    }
                }
            }
            Ok(RowSet::Groups(groups))
        }
        (Stage::DecomposeName, RowSet::Groups(mut groups)) => {
            for group in &mut groups {
                let mut segments = group.name.split('-');
                let code = segments.next().unwrap_or("").trim().to_string();
                let name = segments.next().unwrap_or("").trim().to_string();
                let color = segments
                    .next()
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|| "-".to_string());
                group.code = code;
                group.name = name;
                group.color = color;
            }
            Ok(RowSet::Groups(groups))
        }
        (Stage::Search(needle), RowSet::Groups(mut groups)) => {
            let needle = needle.to_lowercase();
            groups.retain(|g| {
                g.code.to_lowercase().contains(&needle)
                    || g.name.to_lowercase().contains(&needle)
            });
            Ok(RowSet::Groups(groups))
        }
        (Stage::Sort(key, direction), RowSet::Groups(mut groups)) => {
            groups.sort_by(|a, b| {
                let ordering = match key {
                    SortKey::Label => a.key.cmp(&b.key),
                    SortKey::Total => a.total.cmp(&b.total),
                    SortKey::Code => a.code.cmp(&b.code),
                    SortKey::Name => a.name.cmp(&b.name),
                    SortKey::Color => a.color.cmp(&b.color),
                };
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
            Ok(RowSet::Groups(groups))
        }
        (Stage::Skip(count), RowSet::Groups(groups)) => {
            Ok(RowSet::Groups(groups.into_iter().skip(*count).collect()))
        }
        (Stage::Limit(count), RowSet::Groups(groups)) => {
            Ok(RowSet::Groups(groups.into_iter().take(*count).collect()))
        }
        (_, rows) => Err(PipelineError::StageMismatch {
            stage: stage.name(),
            rows: rows.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartLine;

    const VENDOR: &str = "65a1b2c3d4e5f6a7b8c9d0e1";
    const OTHER_VENDOR: &str = "75a1b2c3d4e5f6a7b8c9d0e2";

    fn paid(date: &str) -> Option<DateTime<Utc>> {
        Some(format!("{date}T12:00:00Z").parse().unwrap())
    }

    fn product(id: &str, name: &str, vendor_id: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            vendor_id: vendor_id.to_string(),
        }
    }

    fn order(id: &str, payment_at: Option<DateTime<Utc>>, lines: &[(&str, i64, i64)]) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            payment_at,
            lines: lines
                .iter()
                .map(|(product_id, item_count, quantity)| CartLine {
                    product_id: product_id.to_string(),
                    item_count: *item_count,
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    fn vendor_id() -> VendorId {
        VendorId::parse(VENDOR).unwrap()
    }

    fn sample_input() -> PipelineInput {
        PipelineInput {
            orders: vec![
                order("o1", paid("2024-01-15"), &[("p1", 2, 3), ("p2", 1, 4)]),
                order("o2", None, &[("p1", 5, 1)]),
                order("o3", paid("2024-03-02"), &[("p2", 2, 2), ("px", 9, 9)]),
                order("o4", paid("2024-01-20"), &[("p3", 1, 7)]),
            ],
            products: vec![
                product("p1", "AB12 - Blue Hoodie - Navy", VENDOR),
                product("p2", "CD34 - Red Shirt - Crimson", VENDOR),
                // belongs to someone else, must never be counted
                product("p3", "EF56 - Green Cap - Lime", OTHER_VENDOR),
            ],
        }
    }

    fn monthly_pipeline() -> Pipeline {
        Pipeline::new()
            .stage(Stage::FlattenCartLines)
            .stage(Stage::JoinProducts)
            .stage(Stage::MatchVendor(vendor_id()))
            .stage(Stage::ComputeVolume)
            .stage(Stage::MatchPaid)
            .stage(Stage::GroupByMonth)
            .stage(Stage::Sort(SortKey::Label, SortDirection::Asc))
    }

    fn product_pipeline() -> Pipeline {
        Pipeline::new()
            .stage(Stage::FlattenCartLines)
            .stage(Stage::JoinProducts)
            .stage(Stage::MatchVendor(vendor_id()))
            .stage(Stage::ComputeVolume)
            .stage(Stage::GroupByProduct)
            .stage(Stage::DecomposeName)
    }

    #[test]
    fn monthly_excludes_unpaid_dangling_and_foreign_lines() {
        let rows = monthly_pipeline().run(&sample_input()).unwrap();
        // o2 is unpaid, px dangles, p3 belongs to another vendor
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "2024-01");
        assert_eq!(rows[0].total, 10); // 2*3 from p1 plus 1*4 from p2
        assert_eq!(rows[1].key, "2024-03");
        assert_eq!(rows[1].total, 2 * 2);
    }

    #[test]
    fn monthly_labels_are_sorted_and_unique() {
        let rows = monthly_pipeline().run(&sample_input()).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn month_label_zero_pads() {
        let input = PipelineInput {
            orders: vec![order("o1", paid("2023-04-05"), &[("p1", 1, 1)])],
            products: vec![product("p1", "AB12 - Blue Hoodie - Navy", VENDOR)],
        };
        let rows = monthly_pipeline().run(&input).unwrap();
        assert_eq!(rows[0].key, "2023-04");
    }

    #[test]
    fn product_totals_count_unpaid_lines() {
        let rows = product_pipeline().run(&sample_input()).unwrap();
        let p1 = rows.iter().find(|r| r.code == "AB12").unwrap();
        // paid 2*3 plus unpaid 5*1; the product report has no payment filter
        assert_eq!(p1.total, 11);
    }

    #[test]
    fn decompose_name_splits_three_segments() {
        let rows = product_pipeline().run(&sample_input()).unwrap();
        let p1 = rows.iter().find(|r| r.key == "p1").unwrap();
        assert_eq!(p1.code, "AB12");
        assert_eq!(p1.name, "Blue Hoodie");
        assert_eq!(p1.color, "Navy");
    }

    #[test]
    fn decompose_name_defaults_missing_color() {
        let input = PipelineInput {
            orders: vec![order("o1", paid("2024-01-01"), &[("p1", 1, 1)])],
            products: vec![product("p1", "AB12-Blue Hoodie", VENDOR)],
        };
        let rows = product_pipeline().run(&input).unwrap();
        assert_eq!(rows[0].code, "AB12");
        assert_eq!(rows[0].name, "Blue Hoodie");
        assert_eq!(rows[0].color, "-");
    }

    #[test]
    fn decompose_name_ignores_segments_past_the_third() {
        let input = PipelineInput {
            orders: vec![order("o1", paid("2024-01-01"), &[("p1", 1, 1)])],
            products: vec![product("p1", "AB12 - Two - Tone - Extra", VENDOR)],
        };
        let rows = product_pipeline().run(&input).unwrap();
        assert_eq!(rows[0].code, "AB12");
        assert_eq!(rows[0].name, "Two");
        assert_eq!(rows[0].color, "Tone");
    }

    #[test]
    fn search_matches_code_and_name_case_insensitively() {
        let input = sample_input();
        let by_code = product_pipeline()
            .stage(Stage::Search("ab12".to_string()))
            .run(&input)
            .unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "AB12");

        let by_name = product_pipeline()
            .stage(Stage::Search("red".to_string()))
            .run(&input)
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Red Shirt");
    }

    #[test]
    fn sort_desc_by_total_then_skip_and_limit() {
        let rows = product_pipeline()
            .stage(Stage::Sort(SortKey::Total, SortDirection::Desc))
            .stage(Stage::Skip(1))
            .stage(Stage::Limit(1))
            .run(&sample_input())
            .unwrap();
        // p1 totals 11, p2 totals 8; skipping one leaves p2
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "CD34");
        assert_eq!(rows[0].total, 8);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let input = PipelineInput {
            orders: vec![order(
                "o1",
                paid("2024-01-01"),
                &[("p1", 1, 5), ("p2", 5, 1)],
            )],
            products: vec![
                product("p1", "AB12 - First - Red", VENDOR),
                product("p2", "CD34 - Second - Blue", VENDOR),
            ],
        };
        let rows = product_pipeline()
            .stage(Stage::Sort(SortKey::Total, SortDirection::Desc))
            .run(&input)
            .unwrap();
        assert_eq!(rows[0].code, "AB12");
        assert_eq!(rows[1].code, "CD34");
    }

    #[test]
    fn empty_orders_produce_empty_groups() {
        let input = PipelineInput {
            orders: Vec::new(),
            products: vec![product("p1", "AB12 - Blue Hoodie - Navy", VENDOR)],
        };
        assert!(monthly_pipeline().run(&input).unwrap().is_empty());
        assert!(product_pipeline().run(&input).unwrap().is_empty());
    }

    #[test]
    fn stage_on_wrong_row_set_is_an_error() {
        let result = Pipeline::new()
            .stage(Stage::GroupByMonth)
            .run(&PipelineInput::default());
        assert!(matches!(result, Err(PipelineError::StageMismatch { .. })));

        let result = Pipeline::new()
            .stage(Stage::FlattenCartLines)
            .run(&PipelineInput::default());
        assert!(matches!(result, Err(PipelineError::NotGrouped)));
    }
}
