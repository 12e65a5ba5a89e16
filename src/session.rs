// 💬 Interactive Session - Menu-driven front end for one closet
//
// A Session owns exactly one Catalog for the lifetime of a run and talks to
// the user through any BufRead/Write pair (stdin/stdout in the binary,
// in-memory buffers in tests).
//
// Invalid input never recurses: every prompt is a loop that re-asks until it
// gets something the engine accepts, the user types EXIT where offered, or
// input runs out. End of input ends the session cleanly.

use crate::catalog::Catalog;
use crate::entities::{amount_to_cents, Category};
use crate::error::CatalogError;
use crate::query::{self, GarmentRow, DEFAULT_LEAST_RECENT_LIMIT};
use crate::render;
use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};

const EXIT_WORD: &str = "EXIT";

// ============================================================================
// MENUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Add,
    Log,
    Search,
    Remove,
    Display,
    Quit,
}

impl MainAction {
    const MENU: [&'static str; 6] = [
        "Add Item",
        "Log Item",
        "Search Items",
        "Remove Item",
        "Display Items",
        "Quit",
    ];

    pub fn from_choice(choice: usize) -> crate::error::Result<Self> {
        match choice {
            1 => Ok(MainAction::Add),
            2 => Ok(MainAction::Log),
            3 => Ok(MainAction::Search),
            4 => Ok(MainAction::Remove),
            5 => Ok(MainAction::Display),
            6 => Ok(MainAction::Quit),
            other => Err(invalid_choice(&other.to_string(), Self::MENU.len())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Unworn,
    LeastRecentlyWorn,
    Category,
    Closet,
    ExportCsv,
    Browse,
}

impl DisplayMode {
    const MENU: [&'static str; 6] = [
        "Display unworn items within a category",
        "Display the items worn least recently within a category",
        "Display all items within a category",
        "Display all items within the closet",
        "Export the whole closet as CSV",
        "Browse the closet full-screen",
    ];

    pub fn from_choice(choice: usize) -> crate::error::Result<Self> {
        match choice {
            1 => Ok(DisplayMode::Unworn),
            2 => Ok(DisplayMode::LeastRecentlyWorn),
            3 => Ok(DisplayMode::Category),
            4 => Ok(DisplayMode::Closet),
            5 => Ok(DisplayMode::ExportCsv),
            6 => Ok(DisplayMode::Browse),
            other => Err(invalid_choice(&other.to_string(), Self::MENU.len())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Notes,
}

impl SearchField {
    const MENU: [&'static str; 2] = ["By name", "By notes"];

    pub fn from_choice(choice: usize) -> crate::error::Result<Self> {
        match choice {
            1 => Ok(SearchField::Name),
            2 => Ok(SearchField::Notes),
            other => Err(invalid_choice(&other.to_string(), Self::MENU.len())),
        }
    }
}

/// Validate a typed menu selector against `1..=max`
pub fn parse_choice(raw: &str, max: usize) -> crate::error::Result<usize> {
    let trimmed = raw.trim();
    match trimmed.parse::<usize>() {
        Ok(choice) if (1..=max).contains(&choice) => Ok(choice),
        _ => Err(invalid_choice(trimmed, max)),
    }
}

/// Accept a category name ("Full Body") or its menu number ("3")
pub fn resolve_category(raw: &str) -> crate::error::Result<Category> {
    match raw.trim().parse::<usize>() {
        Ok(choice) => Category::from_choice(choice),
        Err(_) => Category::parse(raw),
    }
}

fn is_exit_word(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(EXIT_WORD)
}

fn invalid_choice(choice: &str, max: usize) -> CatalogError {
    CatalogError::InvalidChoice {
        choice: choice.to_string(),
        max,
    }
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session<R, W> {
    owner: String,
    catalog: Catalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(catalog: Catalog, input: R, output: W) -> Self {
        Session {
            owner: String::new(),
            catalog,
            input,
            output,
        }
    }

    /// Skip the name prompt
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Greet, then loop over the main window until Quit or end of input
    pub fn run(&mut self) -> Result<()> {
        self.say("Hello, welcome to your personal digital closet.")?;

        if self.owner.trim().is_empty() {
            let Some(owner) = self.prompt("Before we begin, please enter your name: ")? else {
                return Ok(());
            };
            self.owner = owner.trim().to_string();
        }
        let greeting = format!("Thank you {}!", self.owner);
        self.say(&greeting)?;

        loop {
            self.say("")?;
            self.say("Welcome to the main window.")?;
            let Some(choice) = self.choose(
                "Please select from the following actions:",
                &MainAction::MENU,
            )?
            else {
                break;
            };
            let action = MainAction::from_choice(choice)?;
            debug!("event=menu_choice module=session action={:?}", action);

            match action {
                MainAction::Add => self.add()?,
                MainAction::Log => self.log_wear()?,
                MainAction::Search => self.search()?,
                MainAction::Remove => self.remove()?,
                MainAction::Display => self.display()?,
                MainAction::Quit => {
                    self.say("Have a nice day!")?;
                    break;
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn add(&mut self) -> Result<()> {
        self.say("Please select the type of garment you would like to add:")?;
        let Some(category) = self.select_category()? else {
            return Ok(());
        };

        self.say("Please enter the name of your item. Names must be unique within a category and are not case sensitive.")?;
        let name = loop {
            let Some(name) = self.prompt("Name: ")? else {
                return Ok(());
            };
            if name.trim().is_empty() {
                self.say(&format!("{}. Please try again.", CatalogError::InvalidName))?;
            } else if is_exit_word(&name) {
                let message = format!(
                    "`{}` is reserved for leaving a prompt. Please choose another name.",
                    EXIT_WORD
                );
                self.say(&message)?;
            } else if self.catalog.find(category, &name).is_some() {
                let message = format!(
                    "An item named `{}` already exists in {}. Please choose another name.",
                    name, category
                );
                self.say(&message)?;
            } else {
                break name;
            }
        };

        self.say("Please enter the price of this item (decimals accepted).")?;
        let cost = loop {
            let Some(raw) = self.prompt("Price: ")? else {
                return Ok(());
            };
            match raw.trim().parse::<f64>() {
                Ok(cost) => match amount_to_cents(cost) {
                    Ok(_) => break cost,
                    Err(err) => self.say(&format!("{}.", err))?,
                },
                Err(_) => self.say("Please type a valid number value (decimals accepted).")?,
            }
        };

        self.say("Please write any notes you have about the item. Press enter when you are done.")?;
        let Some(notes) = self.prompt("Notes: ")? else {
            return Ok(());
        };

        match self.catalog.insert(category, &name, cost, &notes) {
            Ok(_) => {
                let message = format!("Success. Item has been added to {}'s closet.", self.owner);
                self.say(&message)
            }
            Err(err) => self.say(&err.to_string()),
        }
    }

    fn remove(&mut self) -> Result<()> {
        self.say("Please select the type of garment you would like to remove:")?;
        let Some(category) = self.select_category()? else {
            return Ok(());
        };
        let Some(name) = self.prompt_existing_name(category, "remove")? else {
            return Ok(());
        };

        let outcome = self
            .catalog
            .remove(category, &name)
            .map(|garment| garment.name().to_string());
        match outcome {
            Ok(removed) => {
                let message = format!(
                    "Success. {} has been removed from {}'s closet.",
                    removed, self.owner
                );
                self.say(&message)
            }
            Err(err) => self.say(&err.to_string()),
        }
    }

    fn log_wear(&mut self) -> Result<()> {
        self.say("Please select the type of garment you would like to log.")?;
        let Some(category) = self.select_category()? else {
            return Ok(());
        };
        let Some(name) = self.prompt_existing_name(category, "log")? else {
            return Ok(());
        };

        self.say("Please enter the date on which this item was last worn, following the format MM/DD/YYYY.")?;
        loop {
            let Some(date) = self.prompt("Date: ")? else {
                return Ok(());
            };
            let outcome = self
                .catalog
                .log_wear(category, &name, &date)
                .map(|garment| garment.times_worn());
            match outcome {
                Ok(times_worn) => {
                    let message = format!(
                        "Success. Item has been logged ({} wear{} so far).",
                        times_worn,
                        if times_worn == 1 { "" } else { "s" }
                    );
                    return self.say(&message);
                }
                Err(err @ CatalogError::InvalidDate(_)) => {
                    self.say(&format!("{}. Please try again.", err))?;
                }
                Err(err) => return self.say(&err.to_string()),
            }
        }
    }

    fn search(&mut self) -> Result<()> {
        self.say("Please select the type of garment you would like to search.")?;
        let Some(category) = self.select_category()? else {
            return Ok(());
        };
        let Some(choice) = self.choose("Choose how you would like to search:", &SearchField::MENU)? else {
            return Ok(());
        };
        let field = SearchField::from_choice(choice)?;

        let label = match field {
            SearchField::Name => "Name: ",
            SearchField::Notes => "Keyword: ",
        };
        self.say("Enter what you would like to search for (not case sensitive).")?;
        let Some(needle) = self.prompt(label)? else {
            return Ok(());
        };

        let rows = match field {
            SearchField::Name => query::rows(query::search_by_name(&self.catalog, category, &needle)),
            SearchField::Notes => query::rows(query::search_by_notes(&self.catalog, category, &needle)),
        };

        if rows.is_empty() {
            let message = match field {
                SearchField::Name => "Sorry, no items found with the inputted name.",
                SearchField::Notes => "Sorry, no notes found with the inputted keyword.",
            };
            self.say(message)
        } else {
            self.say(&render::table(&rows))
        }
    }

    fn display(&mut self) -> Result<()> {
        let Some(choice) = self.choose(
            "Please choose how you would like to display the items within your closet.",
            &DisplayMode::MENU,
        )?
        else {
            return Ok(());
        };
        let mode = DisplayMode::from_choice(choice)?;

        match mode {
            DisplayMode::Unworn => {
                let Some(category) = self.select_category()? else {
                    return Ok(());
                };
                let listing = query::list_unworn(&self.catalog, category);
                let count = listing.count;
                let rows = query::rows(listing.garments);

                if count == 0 {
                    self.say("You have no unworn garments of this category.")
                } else {
                    self.say(&render::table(&rows))?;
                    self.say(&format!("You have {} unworn items in this category.", count))
                }
            }
            DisplayMode::LeastRecentlyWorn => {
                let Some(category) = self.select_category()? else {
                    return Ok(());
                };
                let rows = query::rows(query::list_least_recently_worn(
                    &self.catalog,
                    category,
                    DEFAULT_LEAST_RECENT_LIMIT,
                ));

                if rows.is_empty() {
                    self.say(&format!(
                        "There are no worn items of the type {} in your closet.",
                        category
                    ))
                } else {
                    self.say(&render::table(&rows))
                }
            }
            DisplayMode::Category => {
                let Some(category) = self.select_category()? else {
                    return Ok(());
                };
                let rows = query::rows(query::list_category(&self.catalog, category));

                if rows.is_empty() {
                    self.say(&format!(
                        "There are no items of the type: {} in your closet.",
                        category
                    ))
                } else {
                    self.say(&render::table(&rows))
                }
            }
            DisplayMode::Closet => {
                let listing = query::list_all(&self.catalog);
                let rows = query::rows(listing.garments());
                let total = listing.total_value;

                self.say(&render::table(&rows))?;
                self.say("")?;
                self.say(&format!("Total closet value: {}", render::money(total)))
            }
            DisplayMode::ExportCsv => {
                let rows: Vec<GarmentRow> = query::rows(query::list_all(&self.catalog).garments());
                render::write_csv(&mut self.output, &rows)
            }
            DisplayMode::Browse => self.browse(),
        }
    }

    #[cfg(feature = "tui")]
    fn browse(&mut self) -> Result<()> {
        crate::ui::run_browser(&self.catalog)
    }

    #[cfg(not(feature = "tui"))]
    fn browse(&mut self) -> Result<()> {
        self.say("The closet browser is not available in this build (enable the `tui` feature).")
    }

    // ========================================================================
    // PROMPT LOOPS
    // ========================================================================

    /// Numbered menu; re-asks until the choice is in range
    fn choose(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>> {
        self.say(title)?;
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("{}) {}", i + 1, option))?;
        }

        loop {
            let Some(raw) = self.prompt("Enter your choice: ")? else {
                return Ok(None);
            };
            match parse_choice(&raw, options.len()) {
                Ok(choice) => return Ok(Some(choice)),
                Err(err) => self.say(&format!("{}. Please try again.", err))?,
            }
        }
    }

    fn select_category(&mut self) -> Result<Option<Category>> {
        self.say("Write the type from the list below (not case sensitive), or its number:")?;
        for category in Catalog::categories() {
            self.say(&format!("{}) {}", category.position(), category.label()))?;
        }

        loop {
            let Some(raw) = self.prompt("Type: ")? else {
                return Ok(None);
            };
            match resolve_category(&raw) {
                Ok(category) => return Ok(Some(category)),
                Err(err) => {
                    self.say(&format!("{}. Please try again.", err))?;
                    self.say("TIP: type the category exactly as shown, watching for extra whitespace.")?;
                }
            }
        }
    }

    /// Ask for a name until it exists in `category`; None on EXIT or end of input
    fn prompt_existing_name(&mut self, category: Category, verb: &str) -> Result<Option<String>> {
        self.say(&format!(
            "Please write the name of the item you would like to {} (not case sensitive).",
            verb
        ))?;

        loop {
            let Some(name) = self.prompt("Name: ")? else {
                return Ok(None);
            };
            if is_exit_word(&name) {
                return Ok(None);
            }
            if self.catalog.find(category, &name).is_some() {
                return Ok(Some(name));
            }
            self.say("Name not found. You must enter the exact name of the item, watching for whitespace.")?;
            self.say(&format!(
                "Type the name again, or type '{}' to return to the main window.",
                EXIT_WORD
            ))?;
        }
    }

    // ========================================================================
    // I/O
    // ========================================================================

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write to output")
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;
        self.read_line()
    }

    /// Next input line without its line ending; None once input is exhausted
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
