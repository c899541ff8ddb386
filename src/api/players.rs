use reqwest::Method;

use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    AssignPlayerInput, CreatePlayerInput, Page, Player, PlayerQuery, UpdatePlayerInput,
};

impl ApiClient {
    pub async fn list_players(&self, query: &PlayerQuery) -> ClientResult<Page<Player>> {
        self.require_token()?;
        self.execute(
            self.request(Method::GET, "/players")
                .query(&query.to_query_pairs()),
        )
        .await
    }

    /// Players with no team assignment.
    pub async fn global_players(&self) -> ClientResult<Vec<Player>> {
        self.require_token()?;
        self.execute(self.request(Method::GET, "/players/global"))
            .await
    }

    pub async fn get_player(&self, id: i64) -> ClientResult<Player> {
        self.require_token()?;
        self.execute(self.request(Method::GET, &format!("/players/{}", id)))
            .await
    }

    pub async fn create_player(&self, input: &CreatePlayerInput) -> ClientResult<Player> {
        input.validate()?;
        self.require_token()?;
        self.execute(self.request(Method::POST, "/players").json(input))
            .await
    }

    pub async fn update_player(&self, id: i64, input: &UpdatePlayerInput) -> ClientResult<Player> {
        input.validate()?;
        self.require_token()?;
        self.execute(self.request(Method::PUT, &format!("/players/{}", id)).json(input))
            .await
    }

    pub async fn delete_player(&self, id: i64) -> ClientResult<()> {
        self.require_token()?;
        self.execute_empty(self.request(Method::DELETE, &format!("/players/{}", id)))
            .await
    }

    pub async fn assign_player(&self, id: i64, team_id: i64) -> ClientResult<Player> {
        self.require_token()?;
        self.execute(
            self.request(Method::PUT, &format!("/players/{}/assign", id))
                .json(&AssignPlayerInput { team_id }),
        )
        .await
    }

    /// Move the player back to the global pool.
    pub async fn unassign_player(&self, id: i64) -> ClientResult<Player> {
        self.require_token()?;
        self.execute(self.request(Method::PUT, &format!("/players/{}/unassign", id)))
            .await
    }
}
