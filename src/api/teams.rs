use reqwest::Method;

use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateTeamInput, Player, Team, UpdateTeamInput};

impl ApiClient {
    pub async fn list_teams(&self) -> ClientResult<Vec<Team>> {
        self.require_token()?;
        self.execute(self.request(Method::GET, "/teams")).await
    }

    pub async fn get_team(&self, id: i64) -> ClientResult<Team> {
        self.require_token()?;
        self.execute(self.request(Method::GET, &format!("/teams/{}", id)))
            .await
    }

    pub async fn create_team(&self, input: &CreateTeamInput) -> ClientResult<Team> {
        input.validate()?;
        self.require_token()?;
        self.execute(self.request(Method::POST, "/teams").json(input))
            .await
    }

    pub async fn update_team(&self, id: i64, input: &UpdateTeamInput) -> ClientResult<Team> {
        input.validate()?;
        self.require_token()?;
        self.execute(self.request(Method::PUT, &format!("/teams/{}", id)).json(input))
            .await
    }

    pub async fn delete_team(&self, id: i64) -> ClientResult<()> {
        self.require_token()?;
        self.execute_empty(self.request(Method::DELETE, &format!("/teams/{}", id)))
            .await
    }

    /// Players currently assigned to the team.
    pub async fn team_players(&self, id: i64) -> ClientResult<Vec<Player>> {
        self.require_token()?;
        self.execute(self.request(Method::GET, &format!("/teams/{}/players", id)))
            .await
    }

    /// Every team paired with its roster, in the order the server lists teams.
    pub async fn league_rosters(&self) -> ClientResult<Vec<(Team, Vec<Player>)>> {
        let teams = self.list_teams().await?;
        let mut rosters = Vec::with_capacity(teams.len());
        for team in teams {
            let players = self.team_players(team.id).await?;
            rosters.push((team, players));
        }
        Ok(rosters)
    }
}
