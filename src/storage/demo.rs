// ABOUTME: Demo data set shipped with the station for first-run and training sessions
// ABOUTME: Two admins, three coaches, two measured students and three classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::data_store::StoreDocument;
use chrono::NaiveDate;
use vumpit_core::constants::labels;
use vumpit_core::models::{
    AthleteProfile, ClassGroup, Gender, JumpMeasurement, MeasurementSnapshot, User, UserRole,
};
use vumpit_intelligence::{classify_bmi, classify_jump, compute_bmi, vertical_jump};

/// Shared demo password for coach accounts
pub const COACH_PASSWORD: &str = "coach123";
/// Shared demo password for admin accounts
pub const ADMIN_PASSWORD: &str = "admin123";
/// Demo password for student accounts
pub const STUDENT_PASSWORD: &str = "student123";

/// The full demo document
#[must_use]
pub fn document() -> StoreDocument {
    StoreDocument {
        users: users(),
        students: students(),
        classes: classes(),
    }
}

fn user(id: &str, name: &str, role: UserRole, sport: &str, college: &str, gender: Gender) -> User {
    let (password, coach_id) = match role {
        UserRole::Coach => (COACH_PASSWORD, Some(id.to_owned())),
        _ => (ADMIN_PASSWORD, None),
    };
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        role,
        sport: sport.to_owned(),
        college: college.to_owned(),
        gender,
        password: password.to_owned(),
        coach_id,
    }
}

fn users() -> Vec<User> {
    vec![
        user("admin", "admin", UserRole::Admin, labels::ALL_SPORTS, "Administration", Gender::Male),
        user("coach", "coach", UserRole::Coach, "Basketball", "College A", Gender::Male),
        user("12345", "John Doe", UserRole::Coach, "Basketball", "College A", Gender::Male),
        user("67890", "Jane Smith", UserRole::Admin, labels::ALL_SPORTS, "College B", Gender::Female),
        user("11223", "Alice Johnson", UserRole::Coach, "Soccer", "College C", Gender::Female),
        user("44556", "Bob Brown", UserRole::Admin, labels::ALL_SPORTS, "College D", Gender::Male),
    ]
}

struct DemoStudent<'a> {
    id: &'a str,
    name: &'a str,
    gender: Gender,
    sport: &'a str,
    college: &'a str,
    course: &'a str,
    year: &'a str,
    section: &'a str,
    classes: &'a [&'a str],
    coach_id: &'a str,
    measured: (i32, u32, u32),
    weight: f64,
    height: f64,
    standing_reach: f64,
    jump_reach: f64,
}

impl DemoStudent<'_> {
    fn build(&self) -> AthleteProfile {
        let mut profile = AthleteProfile::new(self.id, self.name, self.gender);
        profile.sport = self.sport.to_owned();
        profile.college = self.college.to_owned();
        profile.course = self.course.to_owned();
        profile.year = self.year.to_owned();
        profile.section = self.section.to_owned();
        profile.class_list = self.classes.iter().map(|&c| c.to_owned()).collect();
        profile.coach_id = Some(self.coach_id.to_owned());
        profile.password = STUDENT_PASSWORD.to_owned();

        let (y, m, d) = self.measured;
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            let bmi = compute_bmi(self.weight, self.height);
            let jump = vertical_jump(self.standing_reach, self.jump_reach);
            profile.record_snapshot(MeasurementSnapshot {
                date,
                weight: self.weight,
                height: self.height,
                bmi,
                bmi_rating: classify_bmi(bmi),
                jump: Some(JumpMeasurement {
                    standing_reach: self.standing_reach,
                    jump_reach: self.jump_reach,
                    vertical_jump: jump,
                    jump_rating: classify_jump(jump, self.gender),
                }),
            });
        }
        profile
    }
}

fn students() -> Vec<AthleteProfile> {
    [
        DemoStudent {
            id: "STU001",
            name: "Michael Chen",
            gender: Gender::Male,
            sport: "Basketball",
            college: "College A",
            course: "Computer Science",
            year: "2nd Year",
            section: "A",
            classes: &["Basketball-101", "Basketball-Advanced"],
            coach_id: "12345",
            measured: (2025, 10, 15),
            weight: 75.0,
            height: 180.0,
            standing_reach: 230.0,
            jump_reach: 280.0,
        },
        DemoStudent {
            id: "STU002",
            name: "Sarah Williams",
            gender: Gender::Female,
            sport: "Soccer",
            college: "College C",
            course: "Business Administration",
            year: "3rd Year",
            section: "B",
            classes: &["Soccer-Fundamentals"],
            coach_id: "11223",
            measured: (2025, 10, 18),
            weight: 58.0,
            height: 165.0,
            standing_reach: 210.0,
            jump_reach: 250.0,
        },
    ]
    .iter()
    .map(DemoStudent::build)
    .collect()
}

fn class(id: &str, name: &str, coach: (&str, &str), group: [&str; 4]) -> ClassGroup {
    let [college, course, year, section] = group;
    ClassGroup {
        id: id.to_owned(),
        name: name.to_owned(),
        coach_id: coach.0.to_owned(),
        coach_name: coach.1.to_owned(),
        college: college.to_owned(),
        course: course.to_owned(),
        year: year.to_owned(),
        section: section.to_owned(),
    }
}

fn classes() -> Vec<ClassGroup> {
    let john = ("12345", "John Doe");
    let alice = ("11223", "Alice Johnson");
    vec![
        class(
            "CLS001",
            "Basketball-101",
            john,
            ["College A", "Computer Science", "2nd Year", "A"],
        ),
        class(
            "CLS002",
            "Basketball-Advanced",
            john,
            ["College A", "Computer Science", "3rd Year", "A"],
        ),
        class(
            "CLS003",
            "Soccer-Fundamentals",
            alice,
            ["College C", "Business Administration", "3rd Year", "B"],
        ),
    ]
}
