mod pdf;

pub use pdf::{
    GLOBAL_FILE_NAME, LEAGUE_FILE_NAME, export_global_players, export_league,
    export_team_roster, team_file_name, write_pdf,
};
