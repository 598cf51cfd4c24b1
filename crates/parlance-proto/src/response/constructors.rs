//! Fixed-text reply templates.
//!
//! Every constructor takes the recipient's nickname (or `*` before
//! registration) first, then the variable fields in wire order. The text
//! is the RFC 2812 wording, punctuation included. Prefixes are left unset
//! so the caller can stamp its own server name.

use crate::message::Message;
use crate::response::Response;

macro_rules! template {
    ($(#[$meta:meta])* $name:ident => $resp:ident($($arg:ident),*) $text:literal) => {
        $(#[$meta])*
        pub fn $name(client: &str $(, $arg: &str)*) -> Message {
            Message::numeric(
                Response::$resp,
                vec![client.to_owned() $(, $arg.to_owned())*, String::from($text)],
            )
        }
    };
}

impl Response {
    template!(
        /// `401 <nick> :No such nick/channel`
        err_nosuchnick => ERR_NOSUCHNICK(target) "No such nick/channel"
    );
    template!(
        /// `402 <server> :No such server`
        err_nosuchserver => ERR_NOSUCHSERVER(server) "No such server"
    );
    template!(
        /// `403 <channel> :No such channel`
        err_nosuchchannel => ERR_NOSUCHCHANNEL(channel) "No such channel"
    );
    template!(
        /// `404 <channel> :Cannot send to channel`
        err_cannotsendtochan => ERR_CANNOTSENDTOCHAN(channel) "Cannot send to channel"
    );
    template!(
        /// `405 <channel> :You have joined too many channels`
        err_toomanychannels => ERR_TOOMANYCHANNELS(channel) "You have joined too many channels"
    );
    template!(
        /// `406 <nick> :There was no such nickname`
        err_wasnosuchnick => ERR_WASNOSUCHNICK(nick) "There was no such nickname"
    );
    template!(
        /// `408 <service> :No such service`
        err_nosuchservice => ERR_NOSUCHSERVICE(service) "No such service"
    );
    template!(
        /// `409 :No origin specified`
        err_noorigin => ERR_NOORIGIN() "No origin specified"
    );
    template!(
        /// `412 :No text to send`
        err_notexttosend => ERR_NOTEXTTOSEND() "No text to send"
    );
    template!(
        /// `413 <mask> :No toplevel domain specified`
        err_notoplevel => ERR_NOTOPLEVEL(mask) "No toplevel domain specified"
    );
    template!(
        /// `414 <mask> :Wildcard in toplevel domain`
        err_wildtoplevel => ERR_WILDTOPLEVEL(mask) "Wildcard in toplevel domain"
    );
    template!(
        /// `421 <command> :Unknown command`
        err_unknowncommand => ERR_UNKNOWNCOMMAND(command) "Unknown command"
    );
    template!(
        /// `422 :MOTD File is missing`
        err_nomotd => ERR_NOMOTD() "MOTD File is missing"
    );
    template!(
        /// `423 <server> :No administrative info available`
        err_noadmininfo => ERR_NOADMININFO(server) "No administrative info available"
    );
    template!(
        /// `431 :No nickname given`
        err_nonicknamegiven => ERR_NONICKNAMEGIVEN() "No nickname given"
    );
    template!(
        /// `432 <nick> :Erroneous nickname`
        err_erroneusnickname => ERR_ERRONEUSNICKNAME(nick) "Erroneous nickname"
    );
    template!(
        /// `433 <nick> :Nickname is already in use`
        err_nicknameinuse => ERR_NICKNAMEINUSE(nick) "Nickname is already in use"
    );
    template!(
        /// `441 <nick> <channel> :They aren't on that channel`
        err_usernotinchannel => ERR_USERNOTINCHANNEL(nick, channel) "They aren't on that channel"
    );
    template!(
        /// `442 <channel> :You're not on that channel`
        err_notonchannel => ERR_NOTONCHANNEL(channel) "You're not on that channel"
    );
    template!(
        /// `443 <nick> <channel> :is already on channel`
        err_useronchannel => ERR_USERONCHANNEL(nick, channel) "is already on channel"
    );
    template!(
        /// `445 :SUMMON has been disabled`
        err_summondisabled => ERR_SUMMONDISABLED() "SUMMON has been disabled"
    );
    template!(
        /// `446 :USERS has been disabled`
        err_usersdisabled => ERR_USERSDISABLED() "USERS has been disabled"
    );
    template!(
        /// `451 :You have not registered`
        err_notregistered => ERR_NOTREGISTERED() "You have not registered"
    );
    template!(
        /// `461 <command> :Not enough parameters`
        err_needmoreparams => ERR_NEEDMOREPARAMS(command) "Not enough parameters"
    );
    template!(
        /// `462 :Unauthorized command (already registered)`
        err_alreadyregistred => ERR_ALREADYREGISTRED() "Unauthorized command (already registered)"
    );
    template!(
        /// `464 :Password incorrect`
        err_passwdmismatch => ERR_PASSWDMISMATCH() "Password incorrect"
    );
    template!(
        /// `467 <channel> :Channel key already set`
        err_keyset => ERR_KEYSET(channel) "Channel key already set"
    );
    template!(
        /// `471 <channel> :Cannot join channel (+l)`
        err_channelisfull => ERR_CHANNELISFULL(channel) "Cannot join channel (+l)"
    );
    template!(
        /// `473 <channel> :Cannot join channel (+i)`
        err_inviteonlychan => ERR_INVITEONLYCHAN(channel) "Cannot join channel (+i)"
    );
    template!(
        /// `474 <channel> :Cannot join channel (+b)`
        err_bannedfromchan => ERR_BANNEDFROMCHAN(channel) "Cannot join channel (+b)"
    );
    template!(
        /// `475 <channel> :Cannot join channel (+k)`
        err_badchannelkey => ERR_BADCHANNELKEY(channel) "Cannot join channel (+k)"
    );
    template!(
        /// `476 <channel> :Bad Channel Mask`
        err_badchanmask => ERR_BADCHANMASK(channel) "Bad Channel Mask"
    );
    template!(
        /// `477 <channel> :Channel doesn't support modes`
        err_nochanmodes => ERR_NOCHANMODES(channel) "Channel doesn't support modes"
    );
    template!(
        /// `481 :Permission Denied- You're not an IRC operator`
        err_noprivileges => ERR_NOPRIVILEGES() "Permission Denied- You're not an IRC operator"
    );
    template!(
        /// `482 <channel> :You're not channel operator`
        err_chanoprivsneeded => ERR_CHANOPRIVSNEEDED(channel) "You're not channel operator"
    );
    template!(
        /// `483 :You can't kill a server!`
        err_cantkillserver => ERR_CANTKILLSERVER() "You can't kill a server!"
    );
    template!(
        /// `484 :Your connection is restricted!`
        err_restricted => ERR_RESTRICTED() "Your connection is restricted!"
    );
    template!(
        /// `485 :You're not the original channel operator`
        err_uniqopprivsneeded => ERR_UNIQOPPRIVSNEEDED() "You're not the original channel operator"
    );
    template!(
        /// `491 :No O-lines for your host`
        err_nooperhost => ERR_NOOPERHOST() "No O-lines for your host"
    );
    template!(
        /// `501 :Unknown MODE flag`
        err_umodeunknownflag => ERR_UMODEUNKNOWNFLAG() "Unknown MODE flag"
    );
    template!(
        /// `502 :Cannot change mode for other users`
        err_usersdontmatch => ERR_USERSDONTMATCH() "Cannot change mode for other users"
    );

    template!(
        /// `305 :You are no longer marked as being away`
        rpl_unaway => RPL_UNAWAY() "You are no longer marked as being away"
    );
    template!(
        /// `306 :You have been marked as being away`
        rpl_nowaway => RPL_NOWAWAY() "You have been marked as being away"
    );
    template!(
        /// `313 <nick> :is an IRC operator`
        rpl_whoisoperator => RPL_WHOISOPERATOR(nick) "is an IRC operator"
    );
    template!(
        /// `315 <name> :End of WHO list`
        rpl_endofwho => RPL_ENDOFWHO(name) "End of WHO list"
    );
    template!(
        /// `318 <nick> :End of WHOIS list`
        rpl_endofwhois => RPL_ENDOFWHOIS(nick) "End of WHOIS list"
    );
    template!(
        /// `323 :End of LIST`
        rpl_listend => RPL_LISTEND() "End of LIST"
    );
    template!(
        /// `331 <channel> :No topic is set`
        rpl_notopic => RPL_NOTOPIC(channel) "No topic is set"
    );
    template!(
        /// `347 <channel> :End of channel invite list`
        rpl_endofinvitelist => RPL_ENDOFINVITELIST(channel) "End of channel invite list"
    );
    template!(
        /// `349 <channel> :End of channel exception list`
        rpl_endofexceptlist => RPL_ENDOFEXCEPTLIST(channel) "End of channel exception list"
    );
    template!(
        /// `365 <mask> :End of LINKS list`
        rpl_endoflinks => RPL_ENDOFLINKS(mask) "End of LINKS list"
    );
    template!(
        /// `366 <channel> :End of NAMES list`
        rpl_endofnames => RPL_ENDOFNAMES(channel) "End of NAMES list"
    );
    template!(
        /// `368 <channel> :End of channel ban list`
        rpl_endofbanlist => RPL_ENDOFBANLIST(channel) "End of channel ban list"
    );
    template!(
        /// `369 <nick> :End of WHOWAS`
        rpl_endofwhowas => RPL_ENDOFWHOWAS(nick) "End of WHOWAS"
    );
    template!(
        /// `374 :End of INFO list`
        rpl_endofinfo => RPL_ENDOFINFO() "End of INFO list"
    );
    template!(
        /// `376 :End of MOTD command`
        rpl_endofmotd => RPL_ENDOFMOTD() "End of MOTD command"
    );
    template!(
        /// `381 :You are now an IRC operator`
        rpl_youreoper => RPL_YOUREOPER() "You are now an IRC operator"
    );
    template!(
        /// `382 <file> :Rehashing`
        rpl_rehashing => RPL_REHASHING(file) "Rehashing"
    );
    template!(
        /// `219 <letter> :End of STATS report`
        rpl_endofstats => RPL_ENDOFSTATS(letter) "End of STATS report"
    );
    template!(
        /// `235 <mask> <type> :End of service listing`
        rpl_servlistend => RPL_SERVLISTEND(mask, kind) "End of service listing"
    );

    /// `411 :No recipient given (<command>)`
    pub fn err_norecipient(client: &str, command: &str) -> Message {
        Message::numeric(
            Response::ERR_NORECIPIENT,
            vec![client.to_owned(), format!("No recipient given ({command})")],
        )
    }

    /// `407 <target> :Duplicate recipients. No message delivered`
    pub fn err_toomanytargets(client: &str, target: &str) -> Message {
        Message::numeric(
            Response::ERR_TOOMANYTARGETS,
            vec![
                client.to_owned(),
                target.to_owned(),
                "Duplicate recipients. No message delivered".to_owned(),
            ],
        )
    }

    /// `472 <char> :is unknown mode char to me for <channel>`
    pub fn err_unknownmode(client: &str, mode: char, channel: &str) -> Message {
        Message::numeric(
            Response::ERR_UNKNOWNMODE,
            vec![
                client.to_owned(),
                mode.to_string(),
                format!("is unknown mode char to me for {channel}"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_rfc_text() {
        assert_eq!(
            Response::err_nicknameinuse("*", "alice").to_string(),
            "433 * alice :Nickname is already in use"
        );
        assert_eq!(
            Response::err_noprivileges("bob").to_string(),
            "481 bob :Permission Denied- You're not an IRC operator"
        );
        assert_eq!(
            Response::err_usernotinchannel("bob", "carol", "#rust").to_string(),
            "441 bob carol #rust :They aren't on that channel"
        );
        assert_eq!(
            Response::err_norecipient("bob", "PRIVMSG").to_string(),
            "411 bob :No recipient given (PRIVMSG)"
        );
        assert_eq!(
            Response::err_unknownmode("bob", 'v', "#rust").to_string(),
            "472 bob v :is unknown mode char to me for #rust"
        );
    }
}
