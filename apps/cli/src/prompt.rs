//! Interactive prompting.
//!
//! [`TerminalPrompter`] drives `inquire` prompts on a real terminal.
//! [`LinePrompter`] reads one answer per line and is used when stdin is piped.

use anyhow::{Context, Result, bail};
use inquire::{Confirm, Text};
use std::io::{BufRead, Write};

use navigator_core::{StandardChoice, StudentRecord};

/// Printed when the score is not a non-negative integer.
pub const INVALID_NUMBER: &str = "Please enter a valid number.";

/// Printed when the standard token is neither `CC` nor `BNCC`.
pub const INVALID_STANDARD: &str = "Invalid choice. Please enter 'CC' or 'BNCC'.";

/// Returned when the user rejects the entered data.
pub const DATA_NOT_CONFIRMED: &str = "Data not confirmed.";

const STANDARD_PROMPT: &str =
    "Choose the standard for alignment - type 'CC' for Common Core (US) or 'BNCC' for Brazil: ";

/// A source of answers for the interactive flow.
pub trait Prompter: Send {
    /// Asks for free text and returns the answer, trimmed.
    fn ask(&mut self, message: &str) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Shows an informational line.
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Prompts on the terminal with `inquire`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, message: &str) -> Result<String> {
        let answer = Text::new(message.trim_end())
            .prompt()
            .context("Failed to read user input")?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        Confirm::new(message.trim_end())
            .with_default(false)
            .prompt()
            .context("Failed to read user input")
    }

    fn say(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Reads one answer per line from `input`, echoing prompts to `output`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Creates a prompter over a reader and a writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read user input")?;
        if read == 0 {
            bail!("Input ended before all answers were given");
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(self.ask(message)?.to_lowercase().starts_with('y'))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Outcome of the interactive data collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
    /// The user confirmed the data and picked a standard.
    Confirmed { student: StudentRecord, standard: StandardChoice },
    /// The user rejected the data.
    Declined,
}

/// Asks until the answer parses as a score.
pub fn request_score(prompter: &mut dyn Prompter, message: &str) -> Result<u32> {
    loop {
        match prompter.ask(message)?.parse::<u32>() {
            Ok(score) => return Ok(score),
            Err(_) => prompter.say(INVALID_NUMBER)?,
        }
    }
}

/// Shows the entered data and asks the user to confirm it.
pub fn confirm_student(prompter: &mut dyn Prompter, student: &StudentRecord) -> Result<bool> {
    prompter.say(&format!(
        "\nPlease confirm the extracted data:\nName: {}\nGrade: {}\nRIT Score: {}",
        student.name, student.grade, student.score
    ))?;
    prompter.confirm("Is this correct? (y/n): ")
}

/// Asks until a valid standard token is entered.
pub fn choose_standard(prompter: &mut dyn Prompter) -> Result<StandardChoice> {
    loop {
        match StandardChoice::from_token(&prompter.ask(STANDARD_PROMPT)?) {
            Ok(standard) => return Ok(standard),
            Err(_) => prompter.say(INVALID_STANDARD)?,
        }
    }
}

/// Runs the full question sequence for one student.
pub fn collect_student(prompter: &mut dyn Prompter) -> Result<Collected> {
    let name = prompter.ask("Enter Student Name: ")?;
    let grade = prompter.ask("Enter Grade Level (e.g., '3'): ")?;
    let score = request_score(prompter, "Enter Overall RIT Score: ")?;
    let goal_areas = prompter.ask("Describe Goal Areas (optional): ")?;
    let instructional_areas = prompter.ask("Describe Instructional Areas (optional): ")?;

    let student = StudentRecord::new(name, grade, score)
        .with_goal_areas(goal_areas)
        .with_instructional_areas(instructional_areas);

    if !confirm_student(prompter, &student)? {
        return Ok(Collected::Declined);
    }

    let standard = choose_standard(prompter)?;
    Ok(Collected::Confirmed { student, standard })
}
