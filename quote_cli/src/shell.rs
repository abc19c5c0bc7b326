//! Executes parsed commands against a quote and renders the results.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use quote_core::category::RowKind;
use quote_core::export::build_summary_table;
use quote_core::rows::{PricedRow, RowId};
use quote_core::{export_summary, Category, Propagation, Quote, Section};

use crate::commands::{Command, HELP};

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Interactive session state.
pub struct Shell {
    quote: Quote,
    out_dir: PathBuf,
}

impl Shell {
    pub fn new(quote: Quote, out_dir: PathBuf) -> Self {
        Shell { quote, out_dir }
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let text = match command {
            Command::Add(category) => {
                let id = self.quote.add_row(category);
                format!("added {} #{}\n{}", category, id, self.describe_row(category, id))
            }
            Command::Remove(category, id) => {
                if self.quote.remove_row(category, id) {
                    format!(
                        "removed {} #{} (category total {})",
                        category,
                        id,
                        money(self.quote.aggregate().category_sum(category))
                    )
                } else {
                    format!("{} #{} not found", category, id)
                }
            }
            Command::Finish(category, id, name) => {
                let p = self
                    .quote
                    .edit_dimensional(category, id, |row, catalog| row.select_finish_named(catalog, &name))?;
                self.report(category, id, p)
            }
            Command::Length(category, id, raw) => {
                let p = self.quote.edit_dimensional(category, id, |row, _| {
                    row.set_length_input(&raw);
                    Ok(())
                })?;
                self.report(category, id, p)
            }
            Command::Height(category, id, raw) => {
                let p = self.quote.edit_dimensional(category, id, |row, _| {
                    row.set_height_input(&raw);
                    Ok(())
                })?;
                self.report(category, id, p)
            }
            Command::Item(category, id, name) => {
                let p = self
                    .quote
                    .edit_attribute(category, id, |row, catalog| row.select_name(catalog, &name))?;
                self.report(category, id, p)
            }
            Command::Brand(category, id, brand) => {
                let p = self.quote.edit_attribute(category, id, |row, catalog| {
                    row.select_brand(catalog, &brand);
                    Ok(())
                })?;
                self.report(category, id, p)
            }
            Command::Size(category, id, size) => {
                let p = self.quote.edit_attribute(category, id, |row, catalog| {
                    row.select_size(catalog, &size);
                    Ok(())
                })?;
                self.report(category, id, p)
            }
            Command::Quantity(category, id, raw) => {
                let p = self.quote.edit_attribute(category, id, |row, _| {
                    row.set_quantity_input(&raw);
                    Ok(())
                })?;
                self.report(category, id, p)
            }
            Command::Services(services) => {
                self.quote.set_services(services);
                format!("services set, grand total {}", money(self.quote.grand_total()))
            }
            Command::Show => self.render_rows(),
            Command::Summary => build_summary_table(self.quote.aggregate())
                .iter()
                .map(|row| row.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Json => serde_json::to_string_pretty(self.quote.aggregate())?,
            Command::Catalog => self.render_catalog(),
            Command::Export => {
                let path = export_summary(self.quote.aggregate(), &self.out_dir)
                    .with_context(|| format!("export to {} failed", self.out_dir.display()))?;
                format!("wrote {}", path.display())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Print(text))
    }

    fn report(&self, category: Category, id: RowId, propagation: Propagation) -> String {
        match propagation {
            Propagation::NotFound => format!("{} #{} not found", category, id),
            Propagation::Unchanged => format!("{}\n  (total unchanged)", self.describe_row(category, id)),
            Propagation::Updated { category_sum } => format!(
                "{}\n  {} total {}, grand total {}",
                self.describe_row(category, id),
                category.description(),
                money(category_sum),
                money(self.quote.grand_total())
            ),
        }
    }

    fn describe_row(&self, category: Category, id: RowId) -> String {
        let rows = self.quote.section(category.section());
        match category.kind() {
            RowKind::Dimensional => match rows.wood.get(id) {
                Some(row) => format!(
                    "  #{} {} @ {}/sqft  {} x {} = {} sqft  total {}",
                    id,
                    row.finish().unwrap_or("-"),
                    money(row.unit_cost()),
                    row.length(),
                    row.height(),
                    row.area(),
                    money(row.total())
                ),
                None => format!("  #{} (removed)", id),
            },
            RowKind::Attribute => match rows.accessories.get(id) {
                Some(row) => format!(
                    "  #{} {} [brand {} of {:?}] [size {} of {:?}]  {} x {} = {}",
                    id,
                    row.selected_name(),
                    row.selected_brand().unwrap_or("-"),
                    row.brand_options(),
                    row.selected_size().unwrap_or("-"),
                    row.size_options(),
                    row.unit_price().map(money).unwrap_or_else(|| "no price".to_string()),
                    row.quantity(),
                    money(row.total())
                ),
                None => format!("  #{} (removed)", id),
            },
        }
    }

    fn render_rows(&self) -> String {
        let mut out = String::new();
        let aggregate = self.quote.aggregate();
        for category in Category::ALL {
            let _ = writeln!(out, "{}:", category.description());
            for id in self.quote.category_totals(category).ids() {
                let _ = writeln!(out, "{}", self.describe_row(category, id));
            }
            let _ = writeln!(out, "  Total: {}", money(aggregate.category_sum(category)));
        }
        for section in Section::ALL {
            let _ = writeln!(out, "{} total with GST: {}", section.label(), money(aggregate.section_total(section)));
        }
        let services = aggregate.services();
        let _ = writeln!(
            out,
            "Services: excl. GST {}, incl. GST {}, discount {}, handling {}",
            money(services.without_gst),
            money(services.with_gst),
            money(services.discount_total),
            money(services.handling_fee)
        );
        let _ = write!(out, "Grand total: {}", money(aggregate.grand_total()));
        out
    }

    fn render_catalog(&self) -> String {
        let mut out = String::new();
        for section in Section::ALL {
            let data = self.quote.catalog().section(section);
            let _ = writeln!(out, "{} finishes:", section.label());
            for finish in &data.finishes {
                let _ = writeln!(out, "  {} ({}/sqft)", finish.name, money(finish.value));
            }
            let _ = writeln!(out, "{} accessories:", section.label());
            for name in data.accessories.names() {
                let options = data.accessories.options_for(name);
                let _ = writeln!(out, "  {}  brands {:?}  sizes {:?}", name, options.brands, options.sizes);
            }
        }
        out.trim_end().to_string()
    }
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use quote_core::Catalog;

    fn shell(dir: PathBuf) -> Shell {
        Shell::new(Quote::new(Catalog::builtin().clone(), "Test"), dir)
    }

    fn run(shell: &mut Shell, line: &str) -> String {
        match shell.execute(parse(line).unwrap().unwrap()).unwrap() {
            Outcome::Print(text) => text,
            Outcome::Quit => String::new(),
        }
    }

    #[test]
    fn test_wood_row_session() {
        let mut shell = shell(PathBuf::from("."));
        assert!(run(&mut shell, "add wardrobe-wood").contains("added wardrobe-wood #1"));
        run(&mut shell, "len wardrobe-wood 1 3");
        let out = run(&mut shell, "height wardrobe-wood 1 4");
        // 12 sqft of Laminate at 1350
        assert!(out.contains("16200.00"));
        assert_eq!(shell.quote().aggregate().category_sum(Category::WardrobeWood), 16200.0);

        let out = run(&mut shell, "height wardrobe-wood 1 4");
        assert!(out.contains("total unchanged"));
    }

    #[test]
    fn test_accessory_row_session() {
        let mut shell = shell(PathBuf::from("."));
        run(&mut shell, "add kitchen-acc");
        run(&mut shell, "qty kitchen-acc 1 2");
        // Blum 450mm tandem box
        assert_eq!(shell.quote().grand_total(), 15600.0);

        run(&mut shell, "item kitchen-acc 1 Bottle Pull-out");
        assert_eq!(shell.quote().grand_total(), 11200.0);
    }

    #[test]
    fn test_errors_do_not_change_totals() {
        let mut shell = shell(PathBuf::from("."));
        run(&mut shell, "add wardrobe-wood");
        let cmd = parse("qty wardrobe-wood 1 3").unwrap().unwrap();
        assert!(shell.execute(cmd).is_err());
        let cmd = parse("finish wardrobe-wood 1 Teak").unwrap().unwrap();
        assert!(shell.execute(cmd).is_err());
        assert_eq!(shell.quote().grand_total(), 0.0);
    }

    #[test]
    fn test_stale_row() {
        let mut shell = shell(PathBuf::from("."));
        run(&mut shell, "add wardrobe-wood");
        run(&mut shell, "rm wardrobe-wood 1");
        assert!(run(&mut shell, "len wardrobe-wood 1 5").contains("not found"));
        assert!(run(&mut shell, "rm wardrobe-wood 1").contains("not found"));
    }

    #[test]
    fn test_summary_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(dir.path().to_path_buf());
        run(&mut shell, "services 300 330 30 20");
        let summary = run(&mut shell, "summary");
        assert_eq!(summary.lines().count(), 8);
        assert!(summary.lines().last().unwrap().contains("320.00"));

        let out = run(&mut shell, "export");
        assert!(out.starts_with("wrote "));
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn test_show_lists_all_categories() {
        let mut shell = shell(PathBuf::from("."));
        run(&mut shell, "add kitchen-wood");
        let out = run(&mut shell, "show");
        for category in Category::ALL {
            assert!(out.contains(category.description()));
        }
        assert!(out.contains("#1"));
        assert!(out.ends_with("Grand total: 0.00"));
    }

    #[test]
    fn test_quit() {
        let mut shell = shell(PathBuf::from("."));
        assert_eq!(shell.execute(Command::Quit).unwrap(), Outcome::Quit);
    }
}
