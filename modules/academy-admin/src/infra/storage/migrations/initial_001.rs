use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// References never cascade on delete: a parent with children cannot be
/// removed, whatever the application layer decided.
fn restrict(
    name: &str,
    from: (impl IntoTableRef, impl IntoIden),
    to: (impl IntoTableRef, impl IntoIden),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::Restrict)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

fn index(name: &str, table: impl IntoTableRef, col: impl IntoIden) -> IndexCreateStatement {
    Index::create()
        .name(name)
        .table(table)
        .col(col)
        .if_not_exists()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Academies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Academies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Academies::Name).string().not_null())
                    .col(
                        ColumnDef::new(Academies::Subdomain)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Academies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Academies::MaintenanceMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Academies::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Academies::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::AcademyId).uuid())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_users_academy",
                        (Users::Table, Users::AcademyId),
                        (Academies::Table, Academies::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeLevels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GradeLevels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GradeLevels::AcademyId).uuid().not_null())
                    .col(ColumnDef::new(GradeLevels::Name).string().not_null())
                    .col(ColumnDef::new(GradeLevels::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(GradeLevels::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_grade_levels_academy",
                        (GradeLevels::Table, GradeLevels::AcademyId),
                        (Academies::Table, Academies::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StudentProfiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StudentProfiles::UserId).uuid().not_null())
                    .col(ColumnDef::new(StudentProfiles::GradeLevelId).uuid())
                    .col(ColumnDef::new(StudentProfiles::StudentCode).string().not_null())
                    .col(ColumnDef::new(StudentProfiles::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(StudentProfiles::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(StudentProfiles::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(&mut restrict(
                        "fk_student_profiles_user",
                        (StudentProfiles::Table, StudentProfiles::UserId),
                        (Users::Table, Users::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_student_profiles_grade_level",
                        (StudentProfiles::Table, StudentProfiles::GradeLevelId),
                        (GradeLevels::Table, GradeLevels::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherProfiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TeacherProfiles::AcademyId).uuid().not_null())
                    .col(ColumnDef::new(TeacherProfiles::UserId).uuid().not_null())
                    .col(ColumnDef::new(TeacherProfiles::GradeLevelId).uuid())
                    .col(ColumnDef::new(TeacherProfiles::FullName).string().not_null())
                    .col(
                        ColumnDef::new(TeacherProfiles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(TeacherProfiles::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(TeacherProfiles::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(TeacherProfiles::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(&mut restrict(
                        "fk_teacher_profiles_academy",
                        (TeacherProfiles::Table, TeacherProfiles::AcademyId),
                        (Academies::Table, Academies::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_teacher_profiles_user",
                        (TeacherProfiles::Table, TeacherProfiles::UserId),
                        (Users::Table, Users::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_teacher_profiles_grade_level",
                        (TeacherProfiles::Table, TeacherProfiles::GradeLevelId),
                        (GradeLevels::Table, GradeLevels::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InteractiveCourses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InteractiveCourses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(InteractiveCourses::AcademyId).uuid().not_null())
                    .col(ColumnDef::new(InteractiveCourses::TeacherId).uuid())
                    .col(ColumnDef::new(InteractiveCourses::GradeLevelId).uuid())
                    .col(ColumnDef::new(InteractiveCourses::Title).string().not_null())
                    .col(
                        ColumnDef::new(InteractiveCourses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(InteractiveCourses::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(InteractiveCourses::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(InteractiveCourses::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(&mut restrict(
                        "fk_interactive_courses_academy",
                        (InteractiveCourses::Table, InteractiveCourses::AcademyId),
                        (Academies::Table, Academies::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_interactive_courses_teacher",
                        (InteractiveCourses::Table, InteractiveCourses::TeacherId),
                        (TeacherProfiles::Table, TeacherProfiles::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_interactive_courses_grade_level",
                        (InteractiveCourses::Table, InteractiveCourses::GradeLevelId),
                        (GradeLevels::Table, GradeLevels::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lessons::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lessons::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::Position).integer().not_null().default(0))
                    .col(ColumnDef::new(Lessons::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Lessons::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_lessons_course",
                        (Lessons::Table, Lessons::CourseId),
                        (InteractiveCourses::Table, InteractiveCourses::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Packages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Packages::AcademyId).uuid().not_null())
                    .col(ColumnDef::new(Packages::Name).string().not_null())
                    .col(ColumnDef::new(Packages::MonthlyPriceCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(Packages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Packages::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Packages::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_packages_academy",
                        (Packages::Table, Packages::AcademyId),
                        (Academies::Table, Academies::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subscriptions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Subscriptions::PackageId).uuid().not_null())
                    .col(ColumnDef::new(Subscriptions::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Subscriptions::Reference).string().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subscriptions::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Subscriptions::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_subscriptions_package",
                        (Subscriptions::Table, Subscriptions::PackageId),
                        (Packages::Table, Packages::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_subscriptions_student",
                        (Subscriptions::Table, Subscriptions::StudentId),
                        (StudentProfiles::Table, StudentProfiles::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseReviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseReviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CourseReviews::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseReviews::StudentId).uuid().not_null())
                    .col(ColumnDef::new(CourseReviews::Rating).integer().not_null())
                    .col(ColumnDef::new(CourseReviews::Comment).text())
                    .col(
                        ColumnDef::new(CourseReviews::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(CourseReviews::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(CourseReviews::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_course_reviews_course",
                        (CourseReviews::Table, CourseReviews::CourseId),
                        (InteractiveCourses::Table, InteractiveCourses::Id),
                    ))
                    .foreign_key(&mut restrict(
                        "fk_course_reviews_student",
                        (CourseReviews::Table, CourseReviews::StudentId),
                        (StudentProfiles::Table, StudentProfiles::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherPayouts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherPayouts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TeacherPayouts::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(TeacherPayouts::Period).string().not_null())
                    .col(ColumnDef::new(TeacherPayouts::AmountCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(TeacherPayouts::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(TeacherPayouts::ApprovedBy).uuid())
                    .col(ColumnDef::new(TeacherPayouts::ApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(TeacherPayouts::RejectedBy).uuid())
                    .col(ColumnDef::new(TeacherPayouts::RejectedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(TeacherPayouts::RejectionReason).text())
                    .col(ColumnDef::new(TeacherPayouts::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(TeacherPayouts::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut restrict(
                        "fk_teacher_payouts_teacher",
                        (TeacherPayouts::Table, TeacherPayouts::TeacherId),
                        (TeacherProfiles::Table, TeacherProfiles::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        for stmt in [
            index("idx_users_academy", Users::Table, Users::AcademyId),
            index("idx_grade_levels_academy", GradeLevels::Table, GradeLevels::AcademyId),
            index("idx_student_profiles_user", StudentProfiles::Table, StudentProfiles::UserId),
            index(
                "idx_student_profiles_grade_level",
                StudentProfiles::Table,
                StudentProfiles::GradeLevelId,
            ),
            index("idx_teacher_profiles_academy", TeacherProfiles::Table, TeacherProfiles::AcademyId),
            index(
                "idx_interactive_courses_academy",
                InteractiveCourses::Table,
                InteractiveCourses::AcademyId,
            ),
            index("idx_lessons_course", Lessons::Table, Lessons::CourseId),
            index("idx_packages_academy", Packages::Table, Packages::AcademyId),
            index("idx_subscriptions_package", Subscriptions::Table, Subscriptions::PackageId),
            index("idx_course_reviews_course", CourseReviews::Table, CourseReviews::CourseId),
            index("idx_teacher_payouts_teacher", TeacherPayouts::Table, TeacherPayouts::TeacherId),
        ] {
            manager.create_index(stmt).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first; every reference is RESTRICT.
        for stmt in [
            Table::drop().table(TeacherPayouts::Table).if_exists().to_owned(),
            Table::drop().table(CourseReviews::Table).if_exists().to_owned(),
            Table::drop().table(Subscriptions::Table).if_exists().to_owned(),
            Table::drop().table(Packages::Table).if_exists().to_owned(),
            Table::drop().table(Lessons::Table).if_exists().to_owned(),
            Table::drop().table(InteractiveCourses::Table).if_exists().to_owned(),
            Table::drop().table(TeacherProfiles::Table).if_exists().to_owned(),
            Table::drop().table(StudentProfiles::Table).if_exists().to_owned(),
            Table::drop().table(GradeLevels::Table).if_exists().to_owned(),
            Table::drop().table(Users::Table).if_exists().to_owned(),
            Table::drop().table(Academies::Table).if_exists().to_owned(),
        ] {
            manager.drop_table(stmt).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Academies {
    Table,
    Id,
    Name,
    Subdomain,
    IsActive,
    MaintenanceMode,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    AcademyId,
    Name,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeLevels {
    Table,
    Id,
    AcademyId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    GradeLevelId,
    StudentCode,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum TeacherProfiles {
    Table,
    Id,
    AcademyId,
    UserId,
    GradeLevelId,
    FullName,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum InteractiveCourses {
    Table,
    Id,
    AcademyId,
    TeacherId,
    GradeLevelId,
    Title,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    Table,
    Id,
    CourseId,
    Title,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    Id,
    AcademyId,
    Name,
    MonthlyPriceCents,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    PackageId,
    StudentId,
    Reference,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseReviews {
    Table,
    Id,
    CourseId,
    StudentId,
    Rating,
    Comment,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherPayouts {
    Table,
    Id,
    TeacherId,
    Period,
    AmountCents,
    Status,
    ApprovedBy,
    ApprovedAt,
    RejectedBy,
    RejectedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
