use crate::infra::{in_memory_service, uniform_tolerance};
use casting_platform::casting::{CastingService, CastingServiceError, EligibilityConfig, Talent};
use casting_platform::error::AppError;
use clap::Args;
use serde_json::{json, Value};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Tolerance applied to the age, weight and height bands (defaults to 5)
    #[arg(long)]
    pub(crate) tolerance: Option<i32>,
    /// Print the applicant list as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

struct Candidate {
    name: &'static str,
    gender: &'static str,
    age: i32,
    weight: f64,
    height: f64,
}

const CANDIDATES: [Candidate; 5] = [
    Candidate {
        name: "Mohamed Mousa",
        gender: "male",
        age: 33,
        weight: 88.0,
        height: 170.0,
    },
    Candidate {
        name: "Ahmed Ali",
        gender: "male",
        age: 40,
        weight: 80.0,
        height: 177.0,
    },
    Candidate {
        name: "Omar Hassan",
        gender: "male",
        age: 30,
        weight: 90.0,
        height: 167.0,
    },
    Candidate {
        name: "Sara Adel",
        gender: "female",
        age: 33,
        weight: 60.0,
        height: 165.0,
    },
    Candidate {
        name: "Youssef Samy",
        gender: "male",
        age: 41,
        weight: 85.0,
        height: 172.0,
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = args
        .tolerance
        .map(uniform_tolerance)
        .unwrap_or_else(EligibilityConfig::default);
    let service = in_memory_service(config.clone());

    println!("Casting platform demo");
    println!(
        "Tolerance bands: age ±{} | weight ±{} | height ±{}",
        config.age_tolerance, config.weight_tolerance, config.height_tolerance
    );

    let company = service.create_company(&json!({
        "name": "Seedstars",
        "email": "casting@seedstars.com",
        "description": "Production house casting for feature films",
    }))?;
    let project = service.create_project(&json!({
        "company": company.id.0,
        "name": "Eagle Eye",
        "description": "Action feature shooting on location",
        "location": "Cairo",
    }))?;
    println!("\nProject '{}' created for {}", project.details.name, company.profile.name);

    match service.create_project(&json!({
        "name": "Eagle Eye II",
        "description": "Sequel",
        "location": "Cairo",
    })) {
        Ok(sequel) => println!("- sequel '{}' accepted", sequel.details.name),
        Err(err) => println!("- sequel rejected: {err}"),
    }

    let role = service.create_role(&json!({
        "name": "pilot",
        "project": project.id.0,
        "talent_age": 35,
        "talent_gender": "male",
        "talent_ethnicity": "white",
        "talent_weight": 85,
        "talent_height": 172,
    }))?;
    println!(
        "Role '{}' open: {} {} | age {} | weight {} | height {}",
        service.role_label(role.id)?,
        role.criteria.talent_gender,
        role.criteria.talent_ethnicity,
        role.criteria.talent_age,
        role.criteria.talent_weight,
        role.criteria.talent_height
    );

    println!("\nApplications");
    for candidate in &CANDIDATES {
        let talent = service.create_talent(&candidate_payload(candidate))?;
        apply(&service, &talent, role.id.0)?;
    }

    let applicants = service.applicants(role.id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&applicants)?);
    } else {
        println!("\nApplicants for {} ({})", role.criteria.name, applicants.len());
        for talent in &applicants {
            println!(
                "  - #{} {} | age {} | {}kg | {}cm",
                talent.id,
                talent.profile.name,
                talent.profile.age,
                talent.profile.weight,
                talent.profile.height
            );
        }
    }

    Ok(())
}

fn candidate_payload(candidate: &Candidate) -> Value {
    json!({
        "name": candidate.name,
        "email": format!("{}@talent.example", candidate.name.to_lowercase().replace(' ', ".")),
        "phone_number": "01002145214",
        "age": candidate.age,
        "gender": candidate.gender,
        "ethnicity": "white",
        "weight": candidate.weight,
        "height": candidate.height,
    })
}

fn apply(service: &CastingService, talent: &Talent, role_id: u64) -> Result<(), AppError> {
    match service.apply(&json!({ "talent": talent.id.0, "role": role_id })) {
        Ok(application) => {
            println!(
                "  - {} accepted at {}",
                talent,
                application.datetime_applied.format("%Y-%m-%d %H:%M:%S")
            );
            Ok(())
        }
        Err(CastingServiceError::Ineligible(rejection)) => {
            println!("  - {} declined: {}", talent, rejection);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
