//! The `VerseStore` trait: the persistence gateway for every entity kind.
//!
//! The trait is implemented by storage backends (e.g. `siddu-store-sqlite`).
//! The HTTP layer and the ownership resolver depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  casting::{
    Application, ApplicationStatus, CastingCall, CastingCallDetail,
    CastingCallUpdate, NewApplication, NewCastingCall,
  },
  catalog::{
    Award, AwardFields, CricketMatch, CricketMatchFields, Movie, MovieFields,
  },
  id::{
    ApplicationId, AwardId, CastingCallId, CricketMatchId, ExperienceId,
    MovieId, PortfolioItemId, ProfileId, PulseId, SkillId, UserId,
  },
  social::{Comment, FeedPulse, LikeToggle, NewPulse, OwnerRef, Pulse},
  talent::{
    Experience, ExperienceFields, NewPortfolioItem, NewSkill, PortfolioItem,
    ProfileDetail, ProfileFields, Skill, TalentProfile,
  },
  user::{NewUser, Role, User},
};

/// Outcome of an insert guarded by a uniqueness constraint.
///
/// Backends must enforce the constraint themselves so that two concurrent
/// identical inserts cannot both return [`Inserted::New`].
#[derive(Debug, Clone)]
pub enum Inserted<T> {
  New(T),
  Duplicate,
}

/// Abstraction over a Siddu Verse store backend.
///
/// Lookups return `Ok(None)` for a missing row; updates and deletes of child
/// records are scoped to their parent and report whether a row matched.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait VerseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Duplicate when the username or email is already registered.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Inserted<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Case-insensitive on `email`.
  fn get_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn set_user_role(
    &self,
    id: UserId,
    role: Role,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Talent profiles ───────────────────────────────────────────────────

  /// Duplicate when `user_id` already owns a profile.
  fn create_profile(
    &self,
    user_id: UserId,
    fields: ProfileFields,
  ) -> impl Future<Output = Result<Inserted<TalentProfile>, Self::Error>>
  + Send
  + '_;

  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<TalentProfile>, Self::Error>> + Send + '_;

  fn get_profile(
    &self,
    id: ProfileId,
  ) -> impl Future<Output = Result<Option<TalentProfile>, Self::Error>> + Send + '_;

  fn get_profile_by_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<TalentProfile>, Self::Error>> + Send + '_;

  /// The profile together with its skills, experiences and portfolio.
  fn get_profile_detail(
    &self,
    id: ProfileId,
  ) -> impl Future<Output = Result<Option<ProfileDetail>, Self::Error>> + Send + '_;

  /// Replace the editable fields. The owner is never touched.
  fn update_profile(
    &self,
    id: ProfileId,
    fields: ProfileFields,
  ) -> impl Future<Output = Result<Option<TalentProfile>, Self::Error>> + Send + '_;

  // ── Profile children ──────────────────────────────────────────────────

  fn add_skill(
    &self,
    profile_id: ProfileId,
    input: NewSkill,
  ) -> impl Future<Output = Result<Skill, Self::Error>> + Send + '_;

  /// Returns `false` if no skill `skill_id` belongs to `profile_id`.
  fn remove_skill(
    &self,
    profile_id: ProfileId,
    skill_id: SkillId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn add_experience(
    &self,
    profile_id: ProfileId,
    input: ExperienceFields,
  ) -> impl Future<Output = Result<Experience, Self::Error>> + Send + '_;

  fn update_experience(
    &self,
    profile_id: ProfileId,
    experience_id: ExperienceId,
    input: ExperienceFields,
  ) -> impl Future<Output = Result<Option<Experience>, Self::Error>> + Send + '_;

  fn remove_experience(
    &self,
    profile_id: ProfileId,
    experience_id: ExperienceId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn add_portfolio_item(
    &self,
    profile_id: ProfileId,
    input: NewPortfolioItem,
  ) -> impl Future<Output = Result<PortfolioItem, Self::Error>> + Send + '_;

  fn remove_portfolio_item(
    &self,
    profile_id: ProfileId,
    item_id: PortfolioItemId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Casting calls ─────────────────────────────────────────────────────

  /// Persist the call and its roles in one transaction.
  fn create_casting_call(
    &self,
    posted_by: UserId,
    input: NewCastingCall,
  ) -> impl Future<Output = Result<CastingCallDetail, Self::Error>> + Send + '_;

  /// Newest first.
  fn list_casting_calls(
    &self,
  ) -> impl Future<Output = Result<Vec<CastingCall>, Self::Error>> + Send + '_;

  fn get_casting_call(
    &self,
    id: CastingCallId,
  ) -> impl Future<Output = Result<Option<CastingCall>, Self::Error>> + Send + '_;

  fn get_casting_call_detail(
    &self,
    id: CastingCallId,
  ) -> impl Future<Output = Result<Option<CastingCallDetail>, Self::Error>>
  + Send
  + '_;

  fn update_casting_call(
    &self,
    id: CastingCallId,
    update: CastingCallUpdate,
  ) -> impl Future<Output = Result<Option<CastingCall>, Self::Error>> + Send + '_;

  // ── Applications ──────────────────────────────────────────────────────

  /// Duplicate when the profile has already applied to the call.
  fn create_application(
    &self,
    input: NewApplication,
  ) -> impl Future<Output = Result<Inserted<Application>, Self::Error>> + Send + '_;

  fn get_application(
    &self,
    id: ApplicationId,
  ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send + '_;

  fn list_applications_for_call(
    &self,
    call_id: CastingCallId,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn list_applications_for_profile(
    &self,
    profile_id: ProfileId,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn update_application_status(
    &self,
    id: ApplicationId,
    status: ApplicationStatus,
  ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send + '_;

  // ── Pulses and reactions ──────────────────────────────────────────────

  fn create_pulse(
    &self,
    user_id: UserId,
    input: NewPulse,
  ) -> impl Future<Output = Result<Pulse, Self::Error>> + Send + '_;

  fn get_pulse(
    &self,
    id: PulseId,
  ) -> impl Future<Output = Result<Option<Pulse>, Self::Error>> + Send + '_;

  /// All pulses, newest first, with authors and reaction counts.
  fn list_feed(
    &self,
  ) -> impl Future<Output = Result<Vec<FeedPulse>, Self::Error>> + Send + '_;

  /// Remove the caller's like on `owner` if present, otherwise create one.
  /// Must be atomic with respect to other toggles of the same pair.
  fn toggle_like(
    &self,
    user_id: UserId,
    owner: OwnerRef,
  ) -> impl Future<Output = Result<LikeToggle, Self::Error>> + Send + '_;

  fn count_likes(
    &self,
    owner: OwnerRef,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn add_comment(
    &self,
    user_id: UserId,
    owner: OwnerRef,
    content: String,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Oldest first.
  fn list_comments(
    &self,
    owner: OwnerRef,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  // ── Catalog: movies ───────────────────────────────────────────────────

  fn list_movies(
    &self,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + '_;

  fn get_movie(
    &self,
    id: MovieId,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  fn create_movie(
    &self,
    fields: MovieFields,
  ) -> impl Future<Output = Result<Movie, Self::Error>> + Send + '_;

  fn update_movie(
    &self,
    id: MovieId,
    fields: MovieFields,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  // ── Catalog: awards ───────────────────────────────────────────────────

  fn list_awards(
    &self,
  ) -> impl Future<Output = Result<Vec<Award>, Self::Error>> + Send + '_;

  fn get_award(
    &self,
    id: AwardId,
  ) -> impl Future<Output = Result<Option<Award>, Self::Error>> + Send + '_;

  fn create_award(
    &self,
    fields: AwardFields,
  ) -> impl Future<Output = Result<Award, Self::Error>> + Send + '_;

  fn update_award(
    &self,
    id: AwardId,
    fields: AwardFields,
  ) -> impl Future<Output = Result<Option<Award>, Self::Error>> + Send + '_;

  fn delete_award(
    &self,
    id: AwardId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Catalog: cricket ──────────────────────────────────────────────────

  fn list_cricket_matches(
    &self,
  ) -> impl Future<Output = Result<Vec<CricketMatch>, Self::Error>> + Send + '_;

  fn get_cricket_match(
    &self,
    id: CricketMatchId,
  ) -> impl Future<Output = Result<Option<CricketMatch>, Self::Error>> + Send + '_;

  fn create_cricket_match(
    &self,
    fields: CricketMatchFields,
  ) -> impl Future<Output = Result<CricketMatch, Self::Error>> + Send + '_;

  fn update_cricket_match(
    &self,
    id: CricketMatchId,
    fields: CricketMatchFields,
  ) -> impl Future<Output = Result<Option<CricketMatch>, Self::Error>> + Send + '_;
}
