//! [`SqliteStore`]: the SQLite implementation of [`VerseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, Row, params_from_iter, types::Value};
use siddu_core::{
  casting::{
    Application, ApplicationStatus, CastingCall, CastingCallDetail,
    CastingCallUpdate, NewApplication, NewCastingCall,
  },
  catalog::{
    Award, AwardFields, CricketMatch, CricketMatchFields, Movie, MovieFields,
  },
  id::{
    ApplicationId, AwardId, CastingCallId, CommentId, CricketMatchId,
    ExperienceId, LikeId, MovieId, PortfolioItemId, ProfileId, PulseId,
    SkillId, UserId,
  },
  social::{Comment, FeedPulse, Like, LikeToggle, NewPulse, OwnerRef, Pulse},
  store::{Inserted, VerseStore},
  talent::{
    Experience, ExperienceFields, NewPortfolioItem, NewSkill, PortfolioItem,
    ProfileDetail, ProfileFields, Skill, TalentProfile,
  },
  user::{NewUser, Role, User},
};

use crate::{
  Result,
  encode::{
    APPLICATION_COLS, AWARD_COLS, CALL_COLS, COMMENT_COLS, EXPERIENCE_COLS,
    MATCH_COLS, MOVIE_COLS, PORTFOLIO_COLS, PROFILE_COLS, PULSE_COLS,
    ROLE_COLS, SKILL_COLS, USER_COLS, application_row, award_row, call_row,
    encode_date, encode_dt, experience_row, is_unique_violation, match_row,
    movie_row, portfolio_row, profile_row, pulse_row, raw_comment_row,
    role_row, skill_row, user_row, user_summary_at,
  },
  schema::SCHEMA,
};

/// Build a positional parameter list of owned SQLite values.
macro_rules! values {
  ($($v:expr),* $(,)?) => { vec![$(Value::from($v)),*] };
}

type RowMapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Siddu Verse store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All statements
/// run serially on the connection's background thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Statement helpers ─────────────────────────────────────────────────────

  async fn fetch_opt<T: Send + 'static>(
    &self,
    sql: String,
    params: Vec<Value>,
    map: RowMapper<T>,
  ) -> Result<Option<T>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(&sql, params_from_iter(params), map).optional()?)
        })
        .await?,
    )
  }

  async fn fetch_all<T: Send + 'static>(
    &self,
    sql: String,
    params: Vec<Value>,
    map: RowMapper<T>,
  ) -> Result<Vec<T>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map(params_from_iter(params), map)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  /// Run a statement and return the number of affected rows.
  async fn execute(&self, sql: &'static str, params: Vec<Value>) -> Result<usize> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(conn.execute(sql, params_from_iter(params))?))
        .await?,
    )
  }

  /// Run an INSERT and return the new row id.
  async fn insert(&self, sql: &'static str, params: Vec<Value>) -> Result<i64> {
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(sql, params_from_iter(params))?;
          Ok(conn.last_insert_rowid())
        })
        .await?,
    )
  }

  /// Run an INSERT guarded by a UNIQUE constraint. `None` means the
  /// constraint rejected the row.
  async fn insert_unique(
    &self,
    sql: &'static str,
    params: Vec<Value>,
  ) -> Result<Option<i64>> {
    Ok(
      self
        .conn
        .call(move |conn| match conn.execute(sql, params_from_iter(params)) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        })
        .await?,
    )
  }
}

// ─── VerseStore impl ─────────────────────────────────────────────────────────

impl VerseStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<Inserted<User>> {
    let now = Utc::now();
    let id = self
      .insert_unique(
        "INSERT INTO users (username, email, password_hash, role, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        values![
          input.username.clone(),
          input.email.clone(),
          input.password_hash.clone(),
          input.role.as_ref().to_owned(),
          encode_dt(now),
        ],
      )
      .await?;

    Ok(match id {
      None => Inserted::Duplicate,
      Some(id) => Inserted::New(User {
        id:            UserId(id),
        username:      input.username,
        email:         input.email,
        password_hash: input.password_hash,
        avatar_url:    None,
        role:          input.role,
        created_at:    now,
        updated_at:    now,
      }),
    })
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    self
      .fetch_opt(
        format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
        values![id.0],
        user_row,
      )
      .await
  }

  async fn get_user_by_email(&self, email: String) -> Result<Option<User>> {
    // The column is COLLATE NOCASE, so this comparison ignores case.
    self
      .fetch_opt(
        format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
        values![email],
        user_row,
      )
      .await
  }

  async fn set_user_role(&self, id: UserId, role: Role) -> Result<Option<User>> {
    let changed = self
      .execute(
        "UPDATE users SET role = ?2, updated_at = ?3 WHERE id = ?1",
        values![id.0, role.as_ref().to_owned(), encode_dt(Utc::now())],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    self.get_user(id).await
  }

  // ── Talent profiles ───────────────────────────────────────────────────────

  async fn create_profile(
    &self,
    user_id: UserId,
    fields: ProfileFields,
  ) -> Result<Inserted<TalentProfile>> {
    let now = Utc::now();
    let id = self
      .insert_unique(
        "INSERT INTO talent_profiles
           (user_id, full_name, headline, bio, avatar_url, cover_image_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        values![
          user_id.0,
          fields.full_name.clone(),
          fields.headline.clone(),
          fields.bio.clone(),
          fields.avatar_url.clone(),
          fields.cover_image_url.clone(),
          encode_dt(now),
        ],
      )
      .await?;

    Ok(match id {
      None => Inserted::Duplicate,
      Some(id) => Inserted::New(TalentProfile {
        id: ProfileId(id),
        user_id,
        full_name: fields.full_name,
        headline: fields.headline,
        bio: fields.bio,
        avatar_url: fields.avatar_url,
        cover_image_url: fields.cover_image_url,
        created_at: now,
        updated_at: now,
      }),
    })
  }

  async fn list_profiles(&self) -> Result<Vec<TalentProfile>> {
    self
      .fetch_all(
        format!("SELECT {PROFILE_COLS} FROM talent_profiles ORDER BY id"),
        vec![],
        profile_row,
      )
      .await
  }

  async fn get_profile(&self, id: ProfileId) -> Result<Option<TalentProfile>> {
    self
      .fetch_opt(
        format!("SELECT {PROFILE_COLS} FROM talent_profiles WHERE id = ?1"),
        values![id.0],
        profile_row,
      )
      .await
  }

  async fn get_profile_by_user(&self, user_id: UserId) -> Result<Option<TalentProfile>> {
    self
      .fetch_opt(
        format!("SELECT {PROFILE_COLS} FROM talent_profiles WHERE user_id = ?1"),
        values![user_id.0],
        profile_row,
      )
      .await
  }

  async fn get_profile_detail(&self, id: ProfileId) -> Result<Option<ProfileDetail>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let profile = conn
            .query_row(
              &format!("SELECT {PROFILE_COLS} FROM talent_profiles WHERE id = ?1"),
              [id.0],
              profile_row,
            )
            .optional()?;
          let Some(profile) = profile else {
            return Ok(None);
          };

          let skills = conn
            .prepare(&format!(
              "SELECT {SKILL_COLS} FROM skills WHERE talent_profile_id = ?1 ORDER BY id"
            ))?
            .query_map([id.0], skill_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          let experiences = conn
            .prepare(&format!(
              "SELECT {EXPERIENCE_COLS} FROM experiences
               WHERE talent_profile_id = ?1 ORDER BY start_date DESC, id DESC"
            ))?
            .query_map([id.0], experience_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          let portfolio = conn
            .prepare(&format!(
              "SELECT {PORTFOLIO_COLS} FROM portfolio_items
               WHERE talent_profile_id = ?1 ORDER BY id"
            ))?
            .query_map([id.0], portfolio_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          Ok(Some(ProfileDetail { profile, skills, experiences, portfolio }))
        })
        .await?,
    )
  }

  async fn update_profile(
    &self,
    id: ProfileId,
    fields: ProfileFields,
  ) -> Result<Option<TalentProfile>> {
    let changed = self
      .execute(
        "UPDATE talent_profiles
         SET full_name = ?2, headline = ?3, bio = ?4, avatar_url = ?5,
             cover_image_url = ?6, updated_at = ?7
         WHERE id = ?1",
        values![
          id.0,
          fields.full_name,
          fields.headline,
          fields.bio,
          fields.avatar_url,
          fields.cover_image_url,
          encode_dt(Utc::now()),
        ],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    self.get_profile(id).await
  }

  // ── Profile children ──────────────────────────────────────────────────────

  async fn add_skill(&self, profile_id: ProfileId, input: NewSkill) -> Result<Skill> {
    let id = self
      .insert(
        "INSERT INTO skills (talent_profile_id, name, proficiency) VALUES (?1, ?2, ?3)",
        values![profile_id.0, input.name.clone(), input.proficiency.clone()],
      )
      .await?;

    Ok(Skill {
      id:                SkillId(id),
      talent_profile_id: profile_id,
      name:              input.name,
      proficiency:       input.proficiency,
    })
  }

  async fn remove_skill(&self, profile_id: ProfileId, skill_id: SkillId) -> Result<bool> {
    let removed = self
      .execute(
        "DELETE FROM skills WHERE id = ?1 AND talent_profile_id = ?2",
        values![skill_id.0, profile_id.0],
      )
      .await?;
    Ok(removed > 0)
  }

  async fn add_experience(
    &self,
    profile_id: ProfileId,
    input: ExperienceFields,
  ) -> Result<Experience> {
    let id = self
      .insert(
        "INSERT INTO experiences
           (talent_profile_id, title, company_name, start_date, end_date, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        values![
          profile_id.0,
          input.title.clone(),
          input.company_name.clone(),
          encode_date(input.start_date),
          input.end_date.map(encode_date),
          input.description.clone(),
        ],
      )
      .await?;

    Ok(Experience {
      id:                ExperienceId(id),
      talent_profile_id: profile_id,
      title:             input.title,
      company_name:      input.company_name,
      start_date:        input.start_date,
      end_date:          input.end_date,
      description:       input.description,
    })
  }

  async fn update_experience(
    &self,
    profile_id: ProfileId,
    experience_id: ExperienceId,
    input: ExperienceFields,
  ) -> Result<Option<Experience>> {
    let changed = self
      .execute(
        "UPDATE experiences
         SET title = ?3, company_name = ?4, start_date = ?5, end_date = ?6, description = ?7
         WHERE id = ?1 AND talent_profile_id = ?2",
        values![
          experience_id.0,
          profile_id.0,
          input.title.clone(),
          input.company_name.clone(),
          encode_date(input.start_date),
          input.end_date.map(encode_date),
          input.description.clone(),
        ],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }

    Ok(Some(Experience {
      id:                experience_id,
      talent_profile_id: profile_id,
      title:             input.title,
      company_name:      input.company_name,
      start_date:        input.start_date,
      end_date:          input.end_date,
      description:       input.description,
    }))
  }

  async fn remove_experience(
    &self,
    profile_id: ProfileId,
    experience_id: ExperienceId,
  ) -> Result<bool> {
    let removed = self
      .execute(
        "DELETE FROM experiences WHERE id = ?1 AND talent_profile_id = ?2",
        values![experience_id.0, profile_id.0],
      )
      .await?;
    Ok(removed > 0)
  }

  async fn add_portfolio_item(
    &self,
    profile_id: ProfileId,
    input: NewPortfolioItem,
  ) -> Result<PortfolioItem> {
    let id = self
      .insert(
        "INSERT INTO portfolio_items
           (talent_profile_id, title, description, media_url, media_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        values![
          profile_id.0,
          input.title.clone(),
          input.description.clone(),
          input.media_url.clone(),
          input.media_type.clone(),
        ],
      )
      .await?;

    Ok(PortfolioItem {
      id:                PortfolioItemId(id),
      talent_profile_id: profile_id,
      title:             input.title,
      description:       input.description,
      media_url:         input.media_url,
      media_type:        input.media_type,
    })
  }

  async fn remove_portfolio_item(
    &self,
    profile_id: ProfileId,
    item_id: PortfolioItemId,
  ) -> Result<bool> {
    let removed = self
      .execute(
        "DELETE FROM portfolio_items WHERE id = ?1 AND talent_profile_id = ?2",
        values![item_id.0, profile_id.0],
      )
      .await?;
    Ok(removed > 0)
  }

  // ── Casting calls ─────────────────────────────────────────────────────────

  async fn create_casting_call(
    &self,
    posted_by: UserId,
    input: NewCastingCall,
  ) -> Result<CastingCallDetail> {
    let now_str = encode_dt(Utc::now());

    Ok(
      self
        .conn
        .call(move |conn| {
          let tx = conn.transaction()?;
          tx.execute(
            "INSERT INTO casting_calls
               (posted_by_user_id, project_title, project_type, description, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
            rusqlite::params![
              posted_by.0,
              input.project_title,
              input.project_type,
              input.description,
              now_str,
            ],
          )?;
          let call_id = tx.last_insert_rowid();

          for role in &input.roles {
            tx.execute(
              "INSERT INTO casting_roles (casting_call_id, role_name, description, requirements)
               VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![call_id, role.role_name, role.description, role.requirements],
            )?;
          }

          let call = tx.query_row(
            &format!("SELECT {CALL_COLS} FROM casting_calls WHERE id = ?1"),
            [call_id],
            call_row,
          )?;
          let posted_by = tx.query_row(
            "SELECT id, username, avatar_url FROM users WHERE id = ?1",
            [posted_by.0],
            |row| user_summary_at(row, 0),
          )?;
          let roles = tx
            .prepare(&format!(
              "SELECT {ROLE_COLS} FROM casting_roles WHERE casting_call_id = ?1 ORDER BY id"
            ))?
            .query_map([call_id], role_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          tx.commit()?;
          Ok(CastingCallDetail { call, posted_by, roles })
        })
        .await?,
    )
  }

  async fn list_casting_calls(&self) -> Result<Vec<CastingCall>> {
    self
      .fetch_all(
        format!("SELECT {CALL_COLS} FROM casting_calls ORDER BY id DESC"),
        vec![],
        call_row,
      )
      .await
  }

  async fn get_casting_call(&self, id: CastingCallId) -> Result<Option<CastingCall>> {
    self
      .fetch_opt(
        format!("SELECT {CALL_COLS} FROM casting_calls WHERE id = ?1"),
        values![id.0],
        call_row,
      )
      .await
  }

  async fn get_casting_call_detail(
    &self,
    id: CastingCallId,
  ) -> Result<Option<CastingCallDetail>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let call = conn
            .query_row(
              &format!("SELECT {CALL_COLS} FROM casting_calls WHERE id = ?1"),
              [id.0],
              call_row,
            )
            .optional()?;
          let Some(call) = call else {
            return Ok(None);
          };

          let posted_by = conn.query_row(
            "SELECT id, username, avatar_url FROM users WHERE id = ?1",
            [call.posted_by_user_id.0],
            |row| user_summary_at(row, 0),
          )?;
          let roles = conn
            .prepare(&format!(
              "SELECT {ROLE_COLS} FROM casting_roles WHERE casting_call_id = ?1 ORDER BY id"
            ))?
            .query_map([id.0], role_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          Ok(Some(CastingCallDetail { call, posted_by, roles }))
        })
        .await?,
    )
  }

  async fn update_casting_call(
    &self,
    id: CastingCallId,
    update: CastingCallUpdate,
  ) -> Result<Option<CastingCall>> {
    let changed = self
      .execute(
        "UPDATE casting_calls
         SET project_title = COALESCE(?2, project_title),
             project_type  = COALESCE(?3, project_type),
             description   = COALESCE(?4, description),
             is_active     = COALESCE(?5, is_active),
             updated_at    = ?6
         WHERE id = ?1",
        values![
          id.0,
          update.project_title,
          update.project_type,
          update.description,
          update.is_active,
          encode_dt(Utc::now()),
        ],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    self.get_casting_call(id).await
  }

  // ── Applications ──────────────────────────────────────────────────────────

  async fn create_application(
    &self,
    input: NewApplication,
  ) -> Result<Inserted<Application>> {
    let now = Utc::now();
    let status = ApplicationStatus::Pending;
    let id = self
      .insert_unique(
        "INSERT INTO applications
           (talent_profile_id, casting_call_id, status, cover_letter, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        values![
          input.talent_profile_id.0,
          input.casting_call_id.0,
          status.as_ref().to_owned(),
          input.cover_letter.clone(),
          encode_dt(now),
        ],
      )
      .await?;

    Ok(match id {
      None => Inserted::Duplicate,
      Some(id) => Inserted::New(Application {
        id: ApplicationId(id),
        talent_profile_id: input.talent_profile_id,
        casting_call_id: input.casting_call_id,
        status,
        cover_letter: input.cover_letter,
        created_at: now,
        updated_at: now,
      }),
    })
  }

  async fn get_application(&self, id: ApplicationId) -> Result<Option<Application>> {
    self
      .fetch_opt(
        format!("SELECT {APPLICATION_COLS} FROM applications WHERE id = ?1"),
        values![id.0],
        application_row,
      )
      .await
  }

  async fn list_applications_for_call(
    &self,
    call_id: CastingCallId,
  ) -> Result<Vec<Application>> {
    self
      .fetch_all(
        format!(
          "SELECT {APPLICATION_COLS} FROM applications WHERE casting_call_id = ?1 ORDER BY id"
        ),
        values![call_id.0],
        application_row,
      )
      .await
  }

  async fn list_applications_for_profile(
    &self,
    profile_id: ProfileId,
  ) -> Result<Vec<Application>> {
    self
      .fetch_all(
        format!(
          "SELECT {APPLICATION_COLS} FROM applications WHERE talent_profile_id = ?1 ORDER BY id"
        ),
        values![profile_id.0],
        application_row,
      )
      .await
  }

  async fn update_application_status(
    &self,
    id: ApplicationId,
    status: ApplicationStatus,
  ) -> Result<Option<Application>> {
    let changed = self
      .execute(
        "UPDATE applications SET status = ?2, updated_at = ?3 WHERE id = ?1",
        values![id.0, status.as_ref().to_owned(), encode_dt(Utc::now())],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    self.get_application(id).await
  }

  // ── Pulses and reactions ──────────────────────────────────────────────────

  async fn create_pulse(&self, user_id: UserId, input: NewPulse) -> Result<Pulse> {
    let now = Utc::now();
    let id = self
      .insert(
        "INSERT INTO pulses (user_id, content, media_url, media_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        values![
          user_id.0,
          input.content.clone(),
          input.media_url.clone(),
          input.media_type.clone(),
          encode_dt(now),
        ],
      )
      .await?;

    Ok(Pulse {
      id: PulseId(id),
      user_id,
      content: input.content,
      media_url: input.media_url,
      media_type: input.media_type,
      created_at: now,
    })
  }

  async fn get_pulse(&self, id: PulseId) -> Result<Option<Pulse>> {
    self
      .fetch_opt(
        format!("SELECT {PULSE_COLS} FROM pulses WHERE id = ?1"),
        values![id.0],
        pulse_row,
      )
      .await
  }

  async fn list_feed(&self) -> Result<Vec<FeedPulse>> {
    self
      .fetch_all(
        "SELECT
           p.id, p.user_id, p.content, p.media_url, p.media_type, p.created_at,
           u.id, u.username, u.avatar_url,
           (SELECT COUNT(*) FROM likes l
             WHERE l.owner_kind = 'pulse' AND l.owner_id = p.id),
           (SELECT COUNT(*) FROM comments c
             WHERE c.owner_kind = 'pulse' AND c.owner_id = p.id)
         FROM pulses p
         JOIN users u ON u.id = p.user_id
         ORDER BY p.id DESC"
          .to_owned(),
        vec![],
        |row| {
          Ok(FeedPulse {
            pulse:         pulse_row(row)?,
            author:        user_summary_at(row, 6)?,
            like_count:    row.get(9)?,
            comment_count: row.get(10)?,
          })
        },
      )
      .await
  }

  async fn toggle_like(&self, user_id: UserId, owner: OwnerRef) -> Result<LikeToggle> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let kind = owner.kind();
    let owner_id = owner.raw_id();

    let created: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute(
          "DELETE FROM likes WHERE user_id = ?1 AND owner_kind = ?2 AND owner_id = ?3",
          rusqlite::params![user_id.0, kind, owner_id],
        )?;
        let created = if removed > 0 {
          None
        } else {
          tx.execute(
            "INSERT INTO likes (user_id, owner_kind, owner_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user_id.0, kind, owner_id, now_str],
          )?;
          Some(tx.last_insert_rowid())
        };
        tx.commit()?;
        Ok(created)
      })
      .await?;

    Ok(match created {
      None => LikeToggle::Unliked,
      Some(id) => LikeToggle::Liked(Like {
        id: LikeId(id),
        user_id,
        owner,
        created_at: now,
      }),
    })
  }

  async fn count_likes(&self, owner: OwnerRef) -> Result<i64> {
    let kind = owner.kind();
    let owner_id = owner.raw_id();
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE owner_kind = ?1 AND owner_id = ?2",
            rusqlite::params![kind, owner_id],
            |row| row.get(0),
          )?)
        })
        .await?,
    )
  }

  async fn add_comment(
    &self,
    user_id: UserId,
    owner: OwnerRef,
    content: String,
  ) -> Result<Comment> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let kind = owner.kind();
    let owner_id = owner.raw_id();
    let body = content.clone();

    let (id, author) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO comments (user_id, owner_kind, owner_id, content, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![user_id.0, kind, owner_id, body, now_str],
        )?;
        let id = tx.last_insert_rowid();
        let author = tx.query_row(
          "SELECT id, username, avatar_url FROM users WHERE id = ?1",
          [user_id.0],
          |row| user_summary_at(row, 0),
        )?;
        tx.commit()?;
        Ok((id, author))
      })
      .await?;

    Ok(Comment {
      id: CommentId(id),
      user_id,
      owner,
      content,
      created_at: now,
      author,
    })
  }

  async fn list_comments(&self, owner: OwnerRef) -> Result<Vec<Comment>> {
    self
      .fetch_all(
        format!(
          "SELECT {COMMENT_COLS} FROM comments c
           JOIN users u ON u.id = c.user_id
           WHERE c.owner_kind = ?1 AND c.owner_id = ?2 ORDER BY c.id"
        ),
        values![owner.kind().to_owned(), owner.raw_id()],
        raw_comment_row,
      )
      .await?
      .into_iter()
      .map(|raw| raw.into_comment())
      .collect()
  }

  // ── Catalog: movies ───────────────────────────────────────────────────────

  async fn list_movies(&self) -> Result<Vec<Movie>> {
    self
      .fetch_all(format!("SELECT {MOVIE_COLS} FROM movies ORDER BY id"), vec![], movie_row)
      .await
  }

  async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
    self
      .fetch_opt(
        format!("SELECT {MOVIE_COLS} FROM movies WHERE id = ?1"),
        values![id.0],
        movie_row,
      )
      .await
  }

  async fn create_movie(&self, fields: MovieFields) -> Result<Movie> {
    let id = self
      .insert(
        "INSERT INTO movies
           (title, poster_url, sidduscore, genre, release_date, description, director)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        values![
          fields.title.clone(),
          fields.poster_url.clone(),
          fields.sidduscore,
          fields.genre.clone(),
          fields.release_date.map(encode_date),
          fields.description.clone(),
          fields.director.clone(),
        ],
      )
      .await?;

    Ok(Movie {
      id:           MovieId(id),
      title:        fields.title,
      poster_url:   fields.poster_url,
      sidduscore:   fields.sidduscore,
      genre:        fields.genre,
      release_date: fields.release_date,
      description:  fields.description,
      director:     fields.director,
    })
  }

  async fn update_movie(&self, id: MovieId, fields: MovieFields) -> Result<Option<Movie>> {
    let changed = self
      .execute(
        "UPDATE movies
         SET title = ?2, poster_url = ?3, sidduscore = ?4, genre = ?5,
             release_date = ?6, description = ?7, director = ?8
         WHERE id = ?1",
        values![
          id.0,
          fields.title.clone(),
          fields.poster_url.clone(),
          fields.sidduscore,
          fields.genre.clone(),
          fields.release_date.map(encode_date),
          fields.description.clone(),
          fields.director.clone(),
        ],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }

    Ok(Some(Movie {
      id,
      title: fields.title,
      poster_url: fields.poster_url,
      sidduscore: fields.sidduscore,
      genre: fields.genre,
      release_date: fields.release_date,
      description: fields.description,
      director: fields.director,
    }))
  }

  // ── Catalog: awards ───────────────────────────────────────────────────────

  async fn list_awards(&self) -> Result<Vec<Award>> {
    self
      .fetch_all(
        format!("SELECT {AWARD_COLS} FROM awards ORDER BY year DESC, id"),
        vec![],
        award_row,
      )
      .await
  }

  async fn get_award(&self, id: AwardId) -> Result<Option<Award>> {
    self
      .fetch_opt(
        format!("SELECT {AWARD_COLS} FROM awards WHERE id = ?1"),
        values![id.0],
        award_row,
      )
      .await
  }

  async fn create_award(&self, fields: AwardFields) -> Result<Award> {
    let id = self
      .insert(
        "INSERT INTO awards (name, year, logo_url) VALUES (?1, ?2, ?3)",
        values![fields.name.clone(), fields.year, fields.logo_url.clone()],
      )
      .await?;

    Ok(Award {
      id:       AwardId(id),
      name:     fields.name,
      year:     fields.year,
      logo_url: fields.logo_url,
    })
  }

  async fn update_award(&self, id: AwardId, fields: AwardFields) -> Result<Option<Award>> {
    let changed = self
      .execute(
        "UPDATE awards SET name = ?2, year = ?3, logo_url = ?4 WHERE id = ?1",
        values![id.0, fields.name.clone(), fields.year, fields.logo_url.clone()],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    Ok(Some(Award {
      id,
      name: fields.name,
      year: fields.year,
      logo_url: fields.logo_url,
    }))
  }

  async fn delete_award(&self, id: AwardId) -> Result<bool> {
    let removed = self
      .execute("DELETE FROM awards WHERE id = ?1", values![id.0])
      .await?;
    Ok(removed > 0)
  }

  // ── Catalog: cricket ──────────────────────────────────────────────────────

  async fn list_cricket_matches(&self) -> Result<Vec<CricketMatch>> {
    self
      .fetch_all(
        format!("SELECT {MATCH_COLS} FROM cricket_matches ORDER BY date DESC, id"),
        vec![],
        match_row,
      )
      .await
  }

  async fn get_cricket_match(&self, id: CricketMatchId) -> Result<Option<CricketMatch>> {
    self
      .fetch_opt(
        format!("SELECT {MATCH_COLS} FROM cricket_matches WHERE id = ?1"),
        values![id.0],
        match_row,
      )
      .await
  }

  async fn create_cricket_match(&self, fields: CricketMatchFields) -> Result<CricketMatch> {
    let id = self
      .insert(
        "INSERT INTO cricket_matches (team1, team2, date, venue, status, score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        values![
          fields.team1.clone(),
          fields.team2.clone(),
          fields.date.map(encode_dt),
          fields.venue.clone(),
          fields.status.as_ref().to_owned(),
          fields.score.clone(),
        ],
      )
      .await?;

    Ok(CricketMatch {
      id:     CricketMatchId(id),
      team1:  fields.team1,
      team2:  fields.team2,
      date:   fields.date,
      venue:  fields.venue,
      status: fields.status,
      score:  fields.score,
    })
  }

  async fn update_cricket_match(
    &self,
    id: CricketMatchId,
    fields: CricketMatchFields,
  ) -> Result<Option<CricketMatch>> {
    let changed = self
      .execute(
        "UPDATE cricket_matches
         SET team1 = ?2, team2 = ?3, date = ?4, venue = ?5, status = ?6, score = ?7
         WHERE id = ?1",
        values![
          id.0,
          fields.team1.clone(),
          fields.team2.clone(),
          fields.date.map(encode_dt),
          fields.venue.clone(),
          fields.status.as_ref().to_owned(),
          fields.score.clone(),
        ],
      )
      .await?;
    if changed == 0 {
      return Ok(None);
    }

    Ok(Some(CricketMatch {
      id,
      team1: fields.team1,
      team2: fields.team2,
      date: fields.date,
      venue: fields.venue,
      status: fields.status,
      score: fields.score,
    }))
  }
}
