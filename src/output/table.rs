use crate::combine::{CombineOptions, Field};
use crate::errors::CostmergeError;
use crate::models::{CombinedReport, CostComponent, Resource, Summary};
use crate::utils::formatting::{format_cost, format_price, format_quantity};
use super::style::Painter;

pub fn render(report: &CombinedReport, options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(render_text(report, options).into_bytes())
}

/// Plain-text breakdown of every project, one table per project.
pub fn render_text(report: &CombinedReport, options: &CombineOptions) -> String {
    let painter = Painter::new(options.no_color);
    let currency = report.currency.as_str();
    let mut out = String::new();
    let mut free_resources = 0usize;

    for group in &report.groups {
        out.push_str(&painter.bold(&format!("{}: {}", report.group_label, display_key(&group.key))));
        out.push_str("\n\n");

        for entry in &group.projects {
            let project = &entry.project;
            out.push_str(&format!("{} {}\n\n", painter.dim("Project:"), project.name));

            let mut table = TextTable::new(&options.fields);
            if let Some(breakdown) = &project.breakdown {
                for resource in &breakdown.resources {
                    if resource.is_free() && !options.show_skipped {
                        free_resources += 1;
                        continue;
                    }
                    table.add_resource(resource, 0, &options.fields, currency);
                }
            }

            let total = format_cost(project.monthly_cost(), currency);
            out.push_str(&table.render(&painter));
            out.push_str(&total_line(&painter, "Project total", &total, table.width()));
            out.push_str("\n\n");
        }
    }

    let overall = format_cost(report.total_monthly_cost, currency);
    out.push_str(&total_line(&painter, "OVERALL TOTAL", &overall, 0));
    out.push('\n');

    let skipped = skipped_summary(&report.summary, free_resources, options.show_skipped);
    if !skipped.is_empty() {
        out.push_str(&"─".repeat(40));
        out.push('\n');
        out.push_str(&skipped);
    }

    out
}

/// Human name for a group key, `-` when the inputs had no value for it.
pub(crate) fn display_key(key: &str) -> &str {
    if key.is_empty() { "-" } else { key }
}

fn total_line(painter: &Painter, label: &str, value: &str, width: usize) -> String {
    let used = 1 + label.chars().count() + value.chars().count();
    let pad = width.saturating_sub(used).max(2);
    format!(" {}{}{}", painter.bold(label), " ".repeat(pad), value)
}

/// Lines describing resources left out of the cost tables.
pub(crate) fn skipped_summary(summary: &Summary, free_resources: usize, show_skipped: bool) -> String {
    let mut out = String::new();
    let unsupported = summary.total_unsupported_resources.unwrap_or(0);

    if let Some(detected) = summary.total_detected_resources {
        out.push_str(&format!("{} cloud resources were detected:\n", detected));
        if let Some(supported) = summary.total_supported_resources {
            out.push_str(&format!("∙ {} were estimated\n", supported));
        }
    }

    if free_resources > 0 {
        out.push_str(&format!(
            "∙ {} were free, rerun with --show-skipped to see details\n",
            free_resources
        ));
    }

    if unsupported > 0 {
        if show_skipped {
            out.push_str(&format!("∙ {} are not supported yet:\n", unsupported));
            if let Some(counts) = &summary.unsupported_resource_counts {
                for (resource_type, count) in counts {
                    out.push_str(&format!("  ∙ {} x {}\n", count, resource_type));
                }
            }
        } else {
            out.push_str(&format!(
                "∙ {} are not supported yet, rerun with --show-skipped to see details\n",
                unsupported
            ));
        }
    }

    out
}

/// Cell value for one field of a cost component.
pub(crate) fn component_value(component: &CostComponent, field: Field, currency: &str) -> String {
    match field {
        Field::Price => format_price(component.price, currency),
        Field::MonthlyQuantity => format_quantity(component.monthly_quantity),
        Field::Unit => component.unit.clone(),
        Field::HourlyCost => format_cost(component.hourly_cost, currency),
        Field::MonthlyCost => format_cost(component.monthly_cost, currency),
    }
}

/// Name column left-aligned, value columns right-aligned.
struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    fn new(fields: &[Field]) -> Self {
        let mut header = vec!["Name".to_string()];
        header.extend(fields.iter().map(|f| f.title().to_string()));
        Self { header, rows: Vec::new() }
    }

    fn add_resource(&mut self, resource: &Resource, depth: usize, fields: &[Field], currency: &str) {
        let indent = "   ".repeat(depth);
        let mut row = vec![format!("{}{}", indent, resource.name)];
        row.extend(fields.iter().map(|_| String::new()));
        self.rows.push(row);

        let children = resource.cost_components.len() + resource.subresources.len();
        let mut seen = 0;

        for component in &resource.cost_components {
            seen += 1;
            let connector = if seen == children { "└─" } else { "├─" };
            let mut row = vec![format!("{} {} {}", indent, connector, component.name)];
            row.extend(fields.iter().map(|f| component_value(component, *f, currency)));
            self.rows.push(row);
        }

        for sub in &resource.subresources {
            self.add_resource(sub, depth + 1, fields, currency);
        }
        self.rows.push(Vec::new());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn width(&self) -> usize {
        let widths = self.widths();
        1 + widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)
    }

    fn format_row(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from(" ");
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let pad = widths[i].saturating_sub(cell.chars().count());
            if i == 0 {
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            } else {
                line.push_str(&" ".repeat(pad));
                line.push_str(cell);
            }
        }
        line.trim_end().to_string()
    }

    fn render(&self, painter: &Painter) -> String {
        let widths = self.widths();
        let mut out = painter.bold(&Self::format_row(&self.header, &widths));
        out.push_str("\n\n");
        for row in &self.rows {
            if !row.is_empty() {
                out.push_str(&Self::format_row(row, &widths));
            }
            out.push('\n');
        }
        out
    }
}
