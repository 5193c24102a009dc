pub mod action_collector;
pub mod casualties;
pub mod game_flow;
pub mod night_resolver;
pub mod reward_ledger;
pub mod role_assignment;
pub mod vote_resolver;
pub mod win_condition;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_action_collector;
#[cfg(test)]
mod tests_reward_ledger;
#[cfg(test)]
mod tests_vote_resolver;
