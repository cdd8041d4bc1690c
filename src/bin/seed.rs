//! Development data seeder.
//!
//! Populates the catalog with generated courses, subjects, staff, students
//! and parents. Exit code is non-zero when the flag combination is invalid.

use clap::Parser;
use rand::Rng;

use institute_service::entities::sea_orm_active_enums::{DurationUnit, RoleEnum};
use institute_service::entities::{
    attendance_record, attendance_session, course, course_tracking, parent_profile,
    parent_student, principal, routine, student_batch, student_profile, subject,
};
use institute_service::repositories::{
    CourseRepository, NewStudent, PrincipalRepository, StudentRepository, SubjectRepository,
};
use institute_service::static_service::get_database_connection;
use institute_service::utils::timeline;
use institute_service::utils::tracing::init_standard_tracing;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate the database with generated data")]
struct SeedArgs {
    #[arg(long, default_value_t = 0)]
    students: u32,

    #[arg(long, default_value_t = 0)]
    staff: u32,

    #[arg(long, default_value_t = 0)]
    parents: u32,

    #[arg(long, default_value_t = 0)]
    courses: u32,

    #[arg(long, default_value_t = 0)]
    subjects: u32,

    /// Wipe generated data tables before seeding.
    #[arg(long, default_value_t = false)]
    clear: bool,
}

fn validate(args: &SeedArgs) -> Result<(), String> {
    if args.subjects > 0 && args.courses == 0 {
        return Err("--subjects requires --courses".to_string());
    }
    if args.students > 0 && args.courses == 0 {
        return Err("--students requires --courses".to_string());
    }
    if args.parents > args.students {
        return Err("--parents cannot exceed --students".to_string());
    }
    Ok(())
}

/// Sequential suffix keeps generated phones unique across one run.
fn phone(seq: &mut u32) -> String {
    *seq += 1;
    format!("98{:08}", 10_000_000 + *seq)
}

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Anisha", "Bibek", "Dipesh", "Gita", "Kiran", "Maya", "Nabin", "Prakash", "Rashmi",
    "Sita", "Sunil", "Usha",
];
const LAST_NAMES: &[&str] = &[
    "Adhikari", "Bhattarai", "Gurung", "Karki", "Koirala", "Magar", "Rai", "Shrestha", "Tamang",
    "Thapa",
];

fn person_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

async fn clear_tables() -> anyhow::Result<()> {
    let db = get_database_connection().await;

    // Leaves first so foreign keys never block the wipe.
    attendance_record::Entity::delete_many().exec(db).await?;
    attendance_session::Entity::delete_many().exec(db).await?;
    course_tracking::Entity::delete_many().exec(db).await?;
    routine::Entity::delete_many().exec(db).await?;
    subject::Entity::delete_many().exec(db).await?;
    parent_student::Entity::delete_many().exec(db).await?;
    student_batch::Entity::delete_many().exec(db).await?;
    student_profile::Entity::delete_many().exec(db).await?;
    parent_profile::Entity::delete_many().exec(db).await?;
    course::Entity::delete_many().exec(db).await?;

    // Generated student/staff/parent accounts go too; the admin stays.
    principal::Entity::delete_many()
        .filter(principal::Column::Role.ne(RoleEnum::Admin))
        .exec(db)
        .await?;

    tracing::info!("cleared seeded tables");
    Ok(())
}

async fn run(args: SeedArgs) -> anyhow::Result<()> {
    get_database_connection().await;

    if args.clear {
        clear_tables().await?;
    }

    let mut rng = rand::rng();
    let mut phone_seq = 0u32;

    let course_repo = CourseRepository::new();
    let mut courses = Vec::new();
    for index in 0..args.courses {
        let unit = if index % 2 == 0 {
            DurationUnit::Year
        } else {
            DurationUnit::Semester
        };
        let duration = rng.random_range(1..=4);
        let created = course_repo
            .create(
                format!("Course {:02}", index + 1),
                Some(format!("C{:03}", index + 1)),
                duration,
                unit,
                None,
                true,
            )
            .await?;
        courses.push(created);
    }
    tracing::info!("created {} courses", courses.len());

    let subject_repo = SubjectRepository::new();
    for index in 0..args.subjects {
        let course = &courses[(index as usize) % courses.len()];
        let max_period = timeline::max_period(course.duration, course.duration_unit);
        let period = (index as i32 % max_period) + 1;
        subject_repo
            .create(
                course.course_id,
                format!("Subject {:03}", index + 1),
                Some(format!("S{:03}", index + 1)),
                period,
                None,
            )
            .await?;
    }
    tracing::info!("created {} subjects", args.subjects);

    let principal_repo = PrincipalRepository::new();
    for index in 0..args.staff {
        // First staff member of each course acts as its HOD.
        let hod_course = courses.get(index as usize).map(|course| course.course_id);
        let role = if hod_course.is_some() {
            RoleEnum::Hod
        } else {
            RoleEnum::Teacher
        };
        principal_repo
            .create_staff(
                person_name(&mut rng),
                phone(&mut phone_seq),
                None,
                Some("teacher".to_string()),
                role,
                Some("Lecturer".to_string()),
                None,
                hod_course,
            )
            .await?;
    }
    tracing::info!("created {} staff", args.staff);

    let student_repo = StudentRepository::new();
    for index in 0..args.students {
        let course = &courses[(index as usize) % courses.len()];
        let with_parent = index < args.parents;
        let parent_name = with_parent.then(|| person_name(&mut rng));
        let parent_phone = with_parent.then(|| phone(&mut phone_seq));

        student_repo
            .create(NewStudent {
                name: person_name(&mut rng),
                phone: phone(&mut phone_seq),
                email: None,
                password: Some("student".to_string()),
                course_id: Some(course.course_id),
                current_period: Some(1),
                status: None,
                joining_date: None,
                gender: None,
                birth_date: None,
                temporary_address: None,
                permanent_address: None,
                parent_name,
                parent_phone,
            })
            .await?;
    }
    tracing::info!("created {} students", args.students);

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    let args = SeedArgs::parse();
    if let Err(message) = validate(&args) {
        eprintln!("invalid arguments: {message}");
        std::process::exit(2);
    }

    if let Err(err) = run(args).await {
        eprintln!("seeding failed: {err:#}");
        std::process::exit(1);
    }
}
