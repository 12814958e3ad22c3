//! Syllabus, material and assignment management.
//!
//! Syllabuses and materials are only created and deleted through their
//! ordered collections, so positions stay `1..=n` under every parent.

use coursehub_core::course::validate_title;
use coursehub_core::roles::Actor;
use coursehub_core::submission::validate_max_duration_days;
use coursehub_core::types::DbId;
use coursehub_db::models::assignment::{Assignment, CreateAssignment, UpdateAssignment};
use coursehub_db::models::syllabus::{CreateSyllabus, Syllabus, SyllabusDetail, UpdateSyllabus};
use coursehub_db::models::syllabus_material::{
    CreateSyllabusMaterial, SyllabusMaterial, UpdateSyllabusMaterial,
};
use coursehub_db::repositories::syllabus_material_repo::SyllabusMaterials;
use coursehub_db::repositories::syllabus_repo::Syllabuses;
use coursehub_db::repositories::{AssignmentRepo, SyllabusMaterialRepo, SyllabusRepo};
use sqlx::PgPool;

use super::access::{ensure_can_read_syllabus, syllabus_context, CourseContext};
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Syllabuses
// ---------------------------------------------------------------------------

/// Append a syllabus at the end of the course outline.
pub async fn create_syllabus(
    pool: &PgPool,
    actor: &Actor,
    course_id: DbId,
    input: &CreateSyllabus,
) -> AppResult<Syllabus> {
    validate_title(&input.title)?;
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_owner(actor)?;

    let syllabus = Syllabuses::append(pool, course_id, input)
        .await?
        .ok_or(AppError::not_found("Course", course_id))?;
    tracing::info!(
        syllabus_id = syllabus.id,
        course_id,
        sort_order = syllabus.sort_order,
        "Syllabus created"
    );
    Ok(syllabus)
}

/// Syllabus with its materials and assignments.
pub async fn syllabus_detail(
    pool: &PgPool,
    actor: &Actor,
    syllabus_id: DbId,
) -> AppResult<SyllabusDetail> {
    let (syllabus, ctx) = syllabus_context(pool, syllabus_id).await?;
    ensure_can_read_syllabus(pool, actor, &syllabus, &ctx).await?;

    let materials = SyllabusMaterialRepo::list_by_syllabus(pool, syllabus_id).await?;
    let assignments = AssignmentRepo::list_by_syllabus(pool, syllabus_id).await?;
    Ok(SyllabusDetail {
        syllabus,
        materials,
        assignments,
    })
}

pub async fn update_syllabus(
    pool: &PgPool,
    actor: &Actor,
    syllabus_id: DbId,
    input: &UpdateSyllabus,
) -> AppResult<Syllabus> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    let (_, ctx) = syllabus_context(pool, syllabus_id).await?;
    ctx.ensure_owner(actor)?;

    let syllabus = SyllabusRepo::update(pool, syllabus_id, input)
        .await?
        .ok_or(AppError::not_found("Syllabus", syllabus_id))?;
    tracing::info!(syllabus_id, user_id = actor.user_id, "Syllabus updated");
    Ok(syllabus)
}

/// Remove a syllabus and shift later syllabuses up by one.
pub async fn delete_syllabus(pool: &PgPool, actor: &Actor, syllabus_id: DbId) -> AppResult<()> {
    let (_, ctx) = syllabus_context(pool, syllabus_id).await?;
    ctx.ensure_owner(actor)?;

    let removed = Syllabuses::remove(pool, syllabus_id)
        .await?
        .ok_or(AppError::not_found("Syllabus", syllabus_id))?;
    tracing::info!(
        syllabus_id,
        course_id = removed.parent_id,
        sort_order = removed.sort_order,
        compacted = removed.compacted,
        "Syllabus deleted"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

pub async fn create_material(
    pool: &PgPool,
    actor: &Actor,
    syllabus_id: DbId,
    input: &CreateSyllabusMaterial,
) -> AppResult<SyllabusMaterial> {
    validate_title(&input.title)?;
    let (_, ctx) = syllabus_context(pool, syllabus_id).await?;
    ctx.ensure_owner(actor)?;

    let material = SyllabusMaterials::append(pool, syllabus_id, input)
        .await?
        .ok_or(AppError::not_found("Syllabus", syllabus_id))?;
    tracing::info!(
        material_id = material.id,
        syllabus_id,
        sort_order = material.sort_order,
        "Material created"
    );
    Ok(material)
}

pub async fn list_materials(
    pool: &PgPool,
    actor: &Actor,
    syllabus_id: DbId,
) -> AppResult<Vec<SyllabusMaterial>> {
    let (syllabus, ctx) = syllabus_context(pool, syllabus_id).await?;
    ensure_can_read_syllabus(pool, actor, &syllabus, &ctx).await?;
    Ok(SyllabusMaterialRepo::list_by_syllabus(pool, syllabus_id).await?)
}

async fn material_context(
    pool: &PgPool,
    material_id: DbId,
) -> AppResult<(SyllabusMaterial, Syllabus, CourseContext)> {
    let material = SyllabusMaterialRepo::find_by_id(pool, material_id)
        .await?
        .ok_or(AppError::not_found("SyllabusMaterial", material_id))?;
    let (syllabus, ctx) = syllabus_context(pool, material.syllabus_id).await?;
    Ok((material, syllabus, ctx))
}

pub async fn get_material(
    pool: &PgPool,
    actor: &Actor,
    material_id: DbId,
) -> AppResult<SyllabusMaterial> {
    let (material, syllabus, ctx) = material_context(pool, material_id).await?;
    ensure_can_read_syllabus(pool, actor, &syllabus, &ctx).await?;
    Ok(material)
}

pub async fn update_material(
    pool: &PgPool,
    actor: &Actor,
    material_id: DbId,
    input: &UpdateSyllabusMaterial,
) -> AppResult<SyllabusMaterial> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    let (_, _, ctx) = material_context(pool, material_id).await?;
    ctx.ensure_owner(actor)?;

    let material = SyllabusMaterialRepo::update(pool, material_id, input)
        .await?
        .ok_or(AppError::not_found("SyllabusMaterial", material_id))?;
    tracing::info!(material_id, user_id = actor.user_id, "Material updated");
    Ok(material)
}

pub async fn delete_material(pool: &PgPool, actor: &Actor, material_id: DbId) -> AppResult<()> {
    let (_, _, ctx) = material_context(pool, material_id).await?;
    ctx.ensure_owner(actor)?;

    let removed = SyllabusMaterials::remove(pool, material_id)
        .await?
        .ok_or(AppError::not_found("SyllabusMaterial", material_id))?;
    tracing::info!(
        material_id,
        syllabus_id = removed.parent_id,
        sort_order = removed.sort_order,
        compacted = removed.compacted,
        "Material deleted"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

pub async fn create_assignment(
    pool: &PgPool,
    actor: &Actor,
    syllabus_id: DbId,
    input: &CreateAssignment,
) -> AppResult<Assignment> {
    validate_title(&input.title)?;
    validate_max_duration_days(input.max_duration_days)?;
    let (_, ctx) = syllabus_context(pool, syllabus_id).await?;
    ctx.ensure_owner(actor)?;

    let assignment = AssignmentRepo::create(pool, syllabus_id, input).await?;
    tracing::info!(assignment_id = assignment.id, syllabus_id, "Assignment created");
    Ok(assignment)
}

/// Load an assignment with its syllabus and course.
pub async fn assignment_context(
    pool: &PgPool,
    assignment_id: DbId,
) -> AppResult<(Assignment, Syllabus, CourseContext)> {
    let assignment = AssignmentRepo::find_by_id(pool, assignment_id)
        .await?
        .ok_or(AppError::not_found("Assignment", assignment_id))?;
    let (syllabus, ctx) = syllabus_context(pool, assignment.syllabus_id).await?;
    Ok((assignment, syllabus, ctx))
}

pub async fn get_assignment(
    pool: &PgPool,
    actor: &Actor,
    assignment_id: DbId,
) -> AppResult<Assignment> {
    let (assignment, syllabus, ctx) = assignment_context(pool, assignment_id).await?;
    ensure_can_read_syllabus(pool, actor, &syllabus, &ctx).await?;
    Ok(assignment)
}

pub async fn update_assignment(
    pool: &PgPool,
    actor: &Actor,
    assignment_id: DbId,
    input: &UpdateAssignment,
) -> AppResult<Assignment> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(days) = input.max_duration_days {
        validate_max_duration_days(days)?;
    }
    let (_, _, ctx) = assignment_context(pool, assignment_id).await?;
    ctx.ensure_owner(actor)?;

    let assignment = AssignmentRepo::update(pool, assignment_id, input)
        .await?
        .ok_or(AppError::not_found("Assignment", assignment_id))?;
    tracing::info!(assignment_id, user_id = actor.user_id, "Assignment updated");
    Ok(assignment)
}

/// Deleting an assignment cascades to its opens and submissions.
pub async fn delete_assignment(
    pool: &PgPool,
    actor: &Actor,
    assignment_id: DbId,
) -> AppResult<()> {
    let (_, _, ctx) = assignment_context(pool, assignment_id).await?;
    ctx.ensure_owner(actor)?;

    if !AssignmentRepo::delete(pool, assignment_id).await? {
        return Err(AppError::not_found("Assignment", assignment_id));
    }
    tracing::info!(assignment_id, user_id = actor.user_id, "Assignment deleted");
    Ok(())
}
