//! Command line front end for the gradebook.
//!
//! # Responsibility
//! - Parse commands and route them to `CatalogService`.
//! - Keep output line-oriented for quick local checks.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gradebook_core::{
    config::{DATA_DIR_ENV, DEFAULT_DATA_DIR, SEMESTER_START_ENV},
    default_log_level, init_logging, Assignment, Grade, StoreConfig, Student,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(version)]
#[command(about = "Manage students, assignments and grades stored as XML", long_about = None)]
struct Cli {
    /// Directory holding students.xml, assignments.xml and grades.xml
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// First day of the semester, YYYY-MM-DD; enables late-submission checks
    #[arg(long, global = true, env = SEMESTER_START_ENV)]
    semester_start: Option<NaiveDate>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    AddStudent {
        id: String,
        name: String,
        /// Group number, zero or greater
        #[arg(allow_negative_numbers = true)]
        group: i32,
        email: String,
    },
    /// Add an assignment
    AddAssignment {
        id: String,
        description: String,
        /// Deadline week, 1-14
        #[arg(allow_negative_numbers = true)]
        deadline: i32,
        /// Week the assignment was handed out, 1-14
        #[arg(allow_negative_numbers = true)]
        received: i32,
    },
    /// Grade a student on an assignment
    AddGrade {
        id: String,
        student_id: String,
        assignment_id: String,
        value: f64,
        /// Hand-in date, YYYY-MM-DD
        date: NaiveDate,
        /// Grader feedback stored with the grade
        #[arg(long, default_value = "")]
        feedback: String,
    },
    /// Show one student
    FindStudent { id: String },
    /// List all students
    ListStudents,
    /// List all assignments
    ListAssignments,
    /// List all grades
    ListGrades,
    /// Remove a student
    DeleteStudent { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, cli.data_dir.join("logs")) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error error={}", message);
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = StoreConfig::in_dir(&cli.data_dir);
    if let Some(start) = cli.semester_start {
        config = config.with_semester_start(start);
    }
    let stores = config.open();
    let service = stores.service();

    match &cli.command {
        Commands::AddStudent {
            id,
            name,
            group,
            email,
        } => {
            let student = Student::new(id.as_str(), name.as_str(), *group, email.as_str());
            match service.add_student(&student).map_err(|err| err.to_string())? {
                None => println!("added student {id}"),
                Some(existing) => println!("student {} already exists", existing.id),
            }
        }
        Commands::AddAssignment {
            id,
            description,
            deadline,
            received,
        } => {
            let assignment =
                Assignment::new(id.as_str(), description.as_str(), *deadline, *received);
            match service
                .add_assignment(&assignment)
                .map_err(|err| err.to_string())?
            {
                None => println!("added assignment {id}"),
                Some(existing) => println!("assignment {} already exists", existing.id),
            }
        }
        Commands::AddGrade {
            id,
            student_id,
            assignment_id,
            value,
            date,
            feedback,
        } => {
            let grade = Grade::new(
                id.as_str(),
                student_id.as_str(),
                assignment_id.as_str(),
                *value,
                *date,
            );
            let stored = service
                .grade_submission(&grade, feedback)
                .map_err(|err| err.to_string())?;
            println!("grade {id} stored with value {stored}");
        }
        Commands::FindStudent { id } => {
            match service.find_student(id).map_err(|err| err.to_string())? {
                Some(student) => println!("{}", format_student(&student)),
                None => return Err(format!("student not found: `{id}`")),
            }
        }
        Commands::ListStudents => {
            for student in service.all_students().map_err(|err| err.to_string())? {
                println!("{}", format_student(&student));
            }
        }
        Commands::ListAssignments => {
            for assignment in service.all_assignments().map_err(|err| err.to_string())? {
                println!(
                    "{}\t{}\tdeadline={}\treceived={}",
                    assignment.id,
                    assignment.description,
                    assignment.deadline_week,
                    assignment.received_week
                );
            }
        }
        Commands::ListGrades => {
            for grade in service.all_grades().map_err(|err| err.to_string())? {
                println!(
                    "{}\tstudent={}\tassignment={}\tvalue={}\tdate={}\tfeedback={}",
                    grade.id,
                    grade.student_id,
                    grade.assignment_id,
                    grade.value,
                    grade.date,
                    grade.feedback
                );
            }
        }
        Commands::DeleteStudent { id } => {
            match service.delete_student(id).map_err(|err| err.to_string())? {
                Some(_) => println!("deleted student {id}"),
                None => return Err(format!("student not found: `{id}`")),
            }
        }
    }

    Ok(())
}

fn format_student(student: &Student) -> String {
    format!(
        "{}\t{}\tgroup={}\t{}",
        student.id, student.name, student.group, student.email
    )
}
