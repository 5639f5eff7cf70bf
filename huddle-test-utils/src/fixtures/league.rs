//! League record insertion utilities.
//!
//! Inserts seasons, conferences, teams, junctions, players, roster entries and standings
//! directly, bypassing the repositories under test.

use chrono::Utc;
use entity::sea_orm_active_enums::RosterStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn league(&self) -> LeagueFixtures<'_> {
        LeagueFixtures { ctx: self }
    }
}

pub struct LeagueFixtures<'a> {
    pub ctx: &'a TestContext,
}

impl<'a> LeagueFixtures<'a> {
    pub async fn insert_season(
        &self,
        season_id: i32,
        is_current: bool,
    ) -> Result<entity::season::Model, TestError> {
        Ok(
            entity::prelude::Season::insert(entity::season::ActiveModel {
                id: ActiveValue::Set(season_id),
                name: ActiveValue::Set(format!("{} Season", season_id)),
                is_current: ActiveValue::Set(is_current),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    pub async fn insert_conference(
        &self,
        season_id: i32,
        external_league_id: &str,
        name: &str,
    ) -> Result<entity::conference::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Conference::insert(entity::conference::ActiveModel {
                season_id: ActiveValue::Set(season_id),
                external_league_id: ActiveValue::Set(external_league_id.to_string()),
                name: ActiveValue::Set(name.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    pub async fn insert_team(&self, name: &str) -> Result<entity::team::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Team::insert(entity::team::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                owner_name: ActiveValue::Set(None),
                external_owner_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    /// Link a team to a conference under the league's roster id.
    pub async fn insert_junction(
        &self,
        team_id: i32,
        conference_id: i32,
        external_roster_id: Option<i32>,
        is_active: bool,
    ) -> Result<entity::team_conference::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::TeamConference::insert(entity::team_conference::ActiveModel {
                team_id: ActiveValue::Set(team_id),
                conference_id: ActiveValue::Set(conference_id),
                external_roster_id: ActiveValue::Set(external_roster_id),
                waiver_position: ActiveValue::Set(None),
                is_active: ActiveValue::Set(is_active),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    pub async fn insert_player(
        &self,
        external_player_id: &str,
        position: &str,
        nfl_team: Option<&str>,
    ) -> Result<entity::player::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Player::insert(entity::player::ActiveModel {
                external_player_id: ActiveValue::Set(external_player_id.to_string()),
                full_name: ActiveValue::Set(format!("Player {}", external_player_id)),
                position: ActiveValue::Set(Some(position.to_string())),
                nfl_team: ActiveValue::Set(nfl_team.map(str::to_string)),
                status: ActiveValue::Set(Some("Active".to_string())),
                injury_status: ActiveValue::Set(None),
                height: ActiveValue::Set(None),
                weight: ActiveValue::Set(None),
                age: ActiveValue::Set(Some(26)),
                years_exp: ActiveValue::Set(Some(4)),
                data_version: ActiveValue::Set(1),
                is_current_data: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    /// Insert a current roster entry added in `week`.
    pub async fn insert_roster_entry(
        &self,
        team_id: i32,
        player_id: i32,
        conference_id: i32,
        season_id: i32,
        week: i32,
        status: RosterStatus,
    ) -> Result<entity::roster_entry::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::RosterEntry::insert(entity::roster_entry::ActiveModel {
                team_id: ActiveValue::Set(team_id),
                player_id: ActiveValue::Set(player_id),
                season_id: ActiveValue::Set(season_id),
                conference_id: ActiveValue::Set(conference_id),
                week: ActiveValue::Set(week),
                status: ActiveValue::Set(status),
                is_current: ActiveValue::Set(true),
                added_date: ActiveValue::Set(now),
                removed_date: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    /// Insert a standings record for a team in a conference and season.
    pub async fn insert_team_season(
        &self,
        team_id: i32,
        conference_id: i32,
        season_id: i32,
    ) -> Result<entity::team_season::Model, TestError> {
        Ok(
            entity::prelude::TeamSeason::insert(entity::team_season::ActiveModel {
                team_id: ActiveValue::Set(team_id),
                conference_id: ActiveValue::Set(conference_id),
                season_id: ActiveValue::Set(season_id),
                wins: ActiveValue::Set(0),
                losses: ActiveValue::Set(0),
                ties: ActiveValue::Set(0),
                points_for: ActiveValue::Set(0.0),
                points_against: ActiveValue::Set(0.0),
                last_updated: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }
}
