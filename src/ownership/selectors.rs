//! CSS selectors for the ownership table DOM contract.
//!
//! Every `data-testid` hook the target page must expose lives in this file.
//! Update this file when the site changes its markup.
//!
//! **Update process**: when extraction starts skipping rows, capture a
//! rendered HTML sample, update selectors, and add a test fixture.

use crate::ownership::sports::Sport;
use scraper::Selector;
use std::sync::LazyLock;

/// One ownership row in the virtualized list.
pub static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerRow']").unwrap());

/// Player name cell. Its trimmed text is the row's identity key.
pub static PLAYER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayer']").unwrap());

/// Team cell; the team name comes from the logo image's alt text.
pub static TEAM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerTeam'] img").unwrap());

/// Suffix the site appends to logo alt text ("NYY logo").
pub static TEAM_ALT_SUFFIX: &str = " logo";

/// DraftKings salary cell.
pub static DK_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerDkPrice']").unwrap());

/// DraftKings projected ownership cell ("23.4%").
pub static DK_OWNERSHIP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerDkOwnership']").unwrap());

/// FanDuel salary cell.
pub static FD_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerFdPrice']").unwrap());

/// FanDuel projected ownership cell.
pub static FD_OWNERSHIP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-testid='ownershipPlayerFdOwnership']").unwrap());

/// Table container for a sport. Built per sport since the test-id embeds
/// the sport slug.
pub fn container(sport: Sport) -> Selector {
    Selector::parse(&format!("div[data-testid='{}']", sport.container_testid()))
        .expect("container selector must parse for every sport")
}

/// CSS string for the container, used for browser-side waits and scrolling.
pub fn container_css(sport: Sport) -> String {
    format!("div[data-testid='{}']", sport.container_testid())
}
