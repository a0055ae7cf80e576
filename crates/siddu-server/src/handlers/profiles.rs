//! Handlers for `/talent/profiles` endpoints.
//!
//! Everything under a profile id except the plain `GET` is restricted to the
//! profile's owner. Child ids (skills, experiences, portfolio items) are only
//! ever looked up under the gated parent.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use siddu_core::{
  casting::Application,
  id::{ExperienceId, PortfolioItemId, ProfileId, SkillId},
  store::{Inserted, VerseStore},
  talent::{
    Experience, ExperienceFields, NewPortfolioItem, NewSkill, ProfileDetail,
    ProfileFields, TalentProfile,
  },
};

use crate::{
  AppState,
  access::{parse_id, profile_for_owner},
  auth::AuthUser,
  error::{Error, JsonBody},
  handlers::deleted,
};

// ─── Profiles ────────────────────────────────────────────────────────────────

/// `GET /talent/profiles`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<TalentProfile>>, Error>
where
  S: VerseStore + 'static,
{
  let profiles = state.store.list_profiles().await.map_err(Error::store)?;
  Ok(Json(profiles))
}

/// `POST /talent/profiles`: at most one per user.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  fields.validate()?;
  match state
    .store
    .create_profile(caller.id, fields)
    .await
    .map_err(Error::store)?
  {
    Inserted::New(profile) => {
      tracing::info!(user = %caller.id, profile = %profile.id, "created talent profile");
      Ok((StatusCode::CREATED, Json(profile)))
    }
    Inserted::Duplicate => Err(Error::Conflict("user already has a talent profile".into())),
  }
}

/// `GET /talent/profiles/{id}`: the profile with skills, experiences and
/// portfolio.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<ProfileDetail>, Error>
where
  S: VerseStore + 'static,
{
  let id: ProfileId = parse_id(&raw_id, "talent profile")?;
  let detail = state
    .store
    .get_profile_detail(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("talent profile"))?;
  Ok(Json(detail))
}

/// `PUT /talent/profiles/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<Json<TalentProfile>, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  fields.validate()?;
  let updated = state
    .store
    .update_profile(profile.id, fields)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("talent profile"))?;
  Ok(Json(updated))
}

/// `GET /talent/profiles/{id}/applications`: the owner's own applications.
pub async fn applications<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Json<Vec<Application>>, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  let applications = state
    .store
    .list_applications_for_profile(profile.id)
    .await
    .map_err(Error::store)?;
  Ok(Json(applications))
}

// ─── Skills ──────────────────────────────────────────────────────────────────

/// `POST /talent/profiles/{id}/skills`
pub async fn add_skill<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(input): JsonBody<NewSkill>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  input.validate()?;
  let skill = state
    .store
    .add_skill(profile.id, input)
    .await
    .map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(skill)))
}

/// `DELETE /talent/profiles/{id}/skills/{skill_id}`
pub async fn remove_skill<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path((raw_id, raw_skill)): Path<(String, String)>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  let skill_id: SkillId = parse_id(&raw_skill, "skill")?;
  if !state
    .store
    .remove_skill(profile.id, skill_id)
    .await
    .map_err(Error::store)?
  {
    return Err(Error::not_found("skill"));
  }
  Ok(deleted("skill"))
}

// ─── Experiences ─────────────────────────────────────────────────────────────

/// `POST /talent/profiles/{id}/experiences`
pub async fn add_experience<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(input): JsonBody<ExperienceFields>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  input.validate()?;
  let experience = state
    .store
    .add_experience(profile.id, input)
    .await
    .map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(experience)))
}

/// `PUT /talent/profiles/{id}/experiences/{exp_id}`
pub async fn update_experience<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path((raw_id, raw_exp)): Path<(String, String)>,
  JsonBody(input): JsonBody<ExperienceFields>,
) -> Result<Json<Experience>, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  let experience_id: ExperienceId = parse_id(&raw_exp, "experience")?;
  input.validate()?;
  let experience = state
    .store
    .update_experience(profile.id, experience_id, input)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("experience"))?;
  Ok(Json(experience))
}

/// `DELETE /talent/profiles/{id}/experiences/{exp_id}`
pub async fn remove_experience<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path((raw_id, raw_exp)): Path<(String, String)>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  let experience_id: ExperienceId = parse_id(&raw_exp, "experience")?;
  if !state
    .store
    .remove_experience(profile.id, experience_id)
    .await
    .map_err(Error::store)?
  {
    return Err(Error::not_found("experience"));
  }
  Ok(deleted("experience"))
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

/// `POST /talent/profiles/{id}/portfolio`
pub async fn add_portfolio_item<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(input): JsonBody<NewPortfolioItem>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  input.validate()?;
  let item = state
    .store
    .add_portfolio_item(profile.id, input)
    .await
    .map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /talent/profiles/{id}/portfolio/{item_id}`
pub async fn remove_portfolio_item<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path((raw_id, raw_item)): Path<(String, String)>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let profile = profile_for_owner(&*state.store, caller.id, &raw_id).await?;
  let item_id: PortfolioItemId = parse_id(&raw_item, "portfolio item")?;
  if !state
    .store
    .remove_portfolio_item(profile.id, item_id)
    .await
    .map_err(Error::store)?
  {
    return Err(Error::not_found("portfolio item"));
  }
  Ok(deleted("portfolio item"))
}
