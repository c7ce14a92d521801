//! Interactive console menu over the phone catalog.
//!
//! Generic over its input and output so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::models::{BonusSuggestions, Decimal, Phone, UsageCategory, UserPreference};
use crate::services::{paginate, Catalog, Cursor, RecommendationEngine, UsageStrategy};

const RULE: &str = "--------------------------------------------";
const INVALID_NUMBER: &str = "Invalid input! Enter a number.";

/// One console session
///
/// Owns its catalog copy, so the batch cursor used while printing
/// recommendations is never shared with another session.
pub struct Console<'a, R, W> {
    catalog: Catalog,
    bonus: &'a BonusSuggestions,
    page_size: usize,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(
        catalog: Catalog,
        bonus: &'a BonusSuggestions,
        page_size: usize,
        input: R,
        output: W,
    ) -> Self {
        Self {
            catalog,
            bonus,
            page_size: page_size.max(1),
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Welcome to the Phone Recommender")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Find your smartphone based on budget, OS, and usage!")?;

        loop {
            writeln!(self.output, "\n------- Menu -------")?;
            writeln!(self.output, "1: View all phones")?;
            writeln!(self.output, "2: Find recommended phones")?;
            writeln!(self.output, "3: View store link for a phone")?;
            writeln!(self.output, "4: Exit")?;

            let Some(choice) = self.prompt_number::<i64>("Enter your choice: ")? else {
                break;
            };

            let keep_going = match choice {
                1 => self.view_all_phones()?,
                2 => self.find_recommendations()?,
                3 => self.view_store_link()?,
                4 => {
                    writeln!(self.output, "Thank you for using the Phone Recommender!")?;
                    false
                }
                _ => {
                    writeln!(self.output, "Invalid choice! Try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.output.flush()
    }

    /// Lists the catalog one page at a time. Returns false once input ends.
    fn view_all_phones(&mut self) -> io::Result<bool> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No phones available.")?;
            return Ok(true);
        }

        let mut cursor = Cursor::default();
        loop {
            let page = paginate(self.catalog.phones(), cursor, self.page_size);
            for (offset, phone) in page.items.iter().enumerate() {
                writeln!(self.output, "{}", listing_line(cursor.0 + offset + 1, phone))?;
            }

            let Some(next) = page.next else {
                return Ok(true);
            };
            write!(self.output, "Show more? (y/n): ")?;
            self.output.flush()?;
            match self.read_line()? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => cursor = next,
                Some(_) => return Ok(true),
                None => return Ok(false),
            }
        }
    }

    /// Collects preferences and prints main, bonus and additional picks
    fn find_recommendations(&mut self) -> io::Result<bool> {
        let Some(min_budget) = self.prompt_number::<f64>("Enter minimum budget: ")? else {
            return Ok(false);
        };
        let Some(max_budget) = self.prompt_number::<f64>("Enter maximum budget: ")? else {
            return Ok(false);
        };

        write!(self.output, "Enter OS (Android/iOS/No Preference): ")?;
        self.output.flush()?;
        let Some(os) = self.read_line()? else {
            return Ok(false);
        };

        writeln!(self.output, "Enter usage (1-5):")?;
        for (index, category) in UsageCategory::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, category)?;
        }
        let Some(choice) = self.prompt_number::<i64>("Usage: ")? else {
            return Ok(false);
        };

        let usage = UsageCategory::from_selector(choice);
        let pref = UserPreference::from_selection(usage, min_budget, max_budget, Some(&os));
        let strategy = UsageStrategy::from(usage);

        self.catalog.filter_with_strategy(&pref, &strategy);
        if !self.catalog.has_next_batch() {
            writeln!(self.output, "No phones found for your criteria.")?;
            return Ok(true);
        }

        writeln!(self.output, "\nRecommended Phones:")?;
        let mut count = 1;
        while self.catalog.has_next_batch() {
            for phone in self.catalog.next_batch(self.page_size) {
                self.print_recommendation(count, &phone)?;
                count += 1;
            }
        }

        let engine = RecommendationEngine::new(&self.catalog, self.bonus);
        let bonus = engine.get_bonus_suggestions(&pref);
        let additional = engine.additional(&pref, &strategy);

        if !bonus.is_empty() {
            writeln!(self.output, "Bonus Suggestions ({} Edition):", usage.label())?;
            for name in &bonus {
                writeln!(self.output, "{name}")?;
            }
        }

        if !additional.is_empty() {
            writeln!(self.output, "\nWorth stretching the budget for:")?;
            for phone in &additional {
                writeln!(
                    self.output,
                    "- {} {} - {}",
                    phone.brand,
                    phone.name,
                    Decimal(phone.price)
                )?;
            }
        }

        Ok(true)
    }

    fn print_recommendation(&mut self, count: usize, phone: &Phone) -> io::Result<()> {
        writeln!(
            self.output,
            "{}) {} {} - {}",
            count,
            phone.brand,
            phone.name,
            Decimal(phone.price)
        )?;
        writeln!(self.output, "\"{}\"", phone.summary().unwrap_or_default())?;
        writeln!(
            self.output,
            "Sentiment: {}% Positive ({} reviews)",
            Decimal(phone.sentiment),
            phone.total_reviews
        )?;
        writeln!(self.output, "Buy -> {}\n", phone.purchase_link)
    }

    /// Prints the purchase link of a phone picked by number
    fn view_store_link(&mut self) -> io::Result<bool> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No phones available.")?;
            return Ok(true);
        }

        for (index, phone) in self.catalog.phones().iter().enumerate() {
            writeln!(self.output, "{}", listing_line(index + 1, phone))?;
        }

        let Some(number) = self.prompt_number::<i64>("Enter phone number to view store link: ")?
        else {
            return Ok(false);
        };

        let selected = number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.catalog.phones().get(index));
        match selected {
            Some(phone) if !phone.purchase_link.is_empty() => {
                writeln!(self.output, "Buy {} here: {}", phone.name, phone.purchase_link)?
            }
            Some(_) => writeln!(self.output, "No purchase link available.")?,
            None => writeln!(self.output, "Invalid selection.")?,
        }

        Ok(true)
    }

    /// Prompts until a number is entered. `None` when input ends.
    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{INVALID_NUMBER}")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn listing_line(number: usize, phone: &Phone) -> String {
    format!(
        "{}. {} {} - {} | {} | Usage: {}",
        number,
        phone.brand,
        phone.name,
        Decimal(phone.price),
        phone.os,
        phone.usage
    )
}
