//! Numeric reply codes (RFC 2812 section 5).
//!
//! Only the numerics this server actually emits are listed. Fixed-text
//! templates live in `constructors`.

#![allow(non_camel_case_types)]

use std::fmt;

mod constructors;

macro_rules! responses {
    ($( $(#[$doc:meta])* $name:ident = $code:literal, )*) => {
        /// A three digit reply code.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        #[non_exhaustive]
        pub enum Response {
            $( $(#[$doc])* $name = $code, )*
        }

        impl Response {
            /// Look a code up.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )*
                    _ => None,
                }
            }

            /// The symbolic name, e.g. `ERR_NOSUCHNICK`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }
        }
    };
}

responses! {
    /// 001
    RPL_WELCOME = 1,
    /// 002
    RPL_YOURHOST = 2,
    /// 003
    RPL_CREATED = 3,
    /// 004
    RPL_MYINFO = 4,
    /// 005
    RPL_ISUPPORT = 5,

    /// 211
    RPL_STATSLINKINFO = 211,
    /// 212
    RPL_STATSCOMMANDS = 212,
    /// 219
    RPL_ENDOFSTATS = 219,
    /// 221
    RPL_UMODEIS = 221,
    /// 234
    RPL_SERVLIST = 234,
    /// 235
    RPL_SERVLISTEND = 235,
    /// 242
    RPL_STATSUPTIME = 242,
    /// 243
    RPL_STATSOLINE = 243,
    /// 251
    RPL_LUSERCLIENT = 251,
    /// 252
    RPL_LUSEROP = 252,
    /// 253
    RPL_LUSERUNKNOWN = 253,
    /// 254
    RPL_LUSERCHANNELS = 254,
    /// 255
    RPL_LUSERME = 255,
    /// 256
    RPL_ADMINME = 256,
    /// 257
    RPL_ADMINLOC1 = 257,
    /// 258
    RPL_ADMINLOC2 = 258,
    /// 259
    RPL_ADMINEMAIL = 259,

    /// 301
    RPL_AWAY = 301,
    /// 302
    RPL_USERHOST = 302,
    /// 303
    RPL_ISON = 303,
    /// 305
    RPL_UNAWAY = 305,
    /// 306
    RPL_NOWAWAY = 306,
    /// 311
    RPL_WHOISUSER = 311,
    /// 312
    RPL_WHOISSERVER = 312,
    /// 313
    RPL_WHOISOPERATOR = 313,
    /// 314
    RPL_WHOWASUSER = 314,
    /// 315
    RPL_ENDOFWHO = 315,
    /// 317
    RPL_WHOISIDLE = 317,
    /// 318
    RPL_ENDOFWHOIS = 318,
    /// 319
    RPL_WHOISCHANNELS = 319,
    /// 322
    RPL_LIST = 322,
    /// 323
    RPL_LISTEND = 323,
    /// 324
    RPL_CHANNELMODEIS = 324,
    /// 325
    RPL_UNIQOPIS = 325,
    /// 331
    RPL_NOTOPIC = 331,
    /// 332
    RPL_TOPIC = 332,
    /// 333
    RPL_TOPICWHOTIME = 333,
    /// 341
    RPL_INVITING = 341,
    /// 346
    RPL_INVITELIST = 346,
    /// 347
    RPL_ENDOFINVITELIST = 347,
    /// 348
    RPL_EXCEPTLIST = 348,
    /// 349
    RPL_ENDOFEXCEPTLIST = 349,
    /// 351
    RPL_VERSION = 351,
    /// 352
    RPL_WHOREPLY = 352,
    /// 353
    RPL_NAMREPLY = 353,
    /// 364
    RPL_LINKS = 364,
    /// 365
    RPL_ENDOFLINKS = 365,
    /// 366
    RPL_ENDOFNAMES = 366,
    /// 367
    RPL_BANLIST = 367,
    /// 368
    RPL_ENDOFBANLIST = 368,
    /// 369
    RPL_ENDOFWHOWAS = 369,
    /// 371
    RPL_INFO = 371,
    /// 372
    RPL_MOTD = 372,
    /// 374
    RPL_ENDOFINFO = 374,
    /// 375
    RPL_MOTDSTART = 375,
    /// 376
    RPL_ENDOFMOTD = 376,
    /// 381
    RPL_YOUREOPER = 381,
    /// 382
    RPL_REHASHING = 382,
    /// 383
    RPL_YOURESERVICE = 383,
    /// 391
    RPL_TIME = 391,

    /// 401
    ERR_NOSUCHNICK = 401,
    /// 402
    ERR_NOSUCHSERVER = 402,
    /// 403
    ERR_NOSUCHCHANNEL = 403,
    /// 404
    ERR_CANNOTSENDTOCHAN = 404,
    /// 405
    ERR_TOOMANYCHANNELS = 405,
    /// 406
    ERR_WASNOSUCHNICK = 406,
    /// 407
    ERR_TOOMANYTARGETS = 407,
    /// 408
    ERR_NOSUCHSERVICE = 408,
    /// 409
    ERR_NOORIGIN = 409,
    /// 411
    ERR_NORECIPIENT = 411,
    /// 412
    ERR_NOTEXTTOSEND = 412,
    /// 413
    ERR_NOTOPLEVEL = 413,
    /// 414
    ERR_WILDTOPLEVEL = 414,
    /// 421
    ERR_UNKNOWNCOMMAND = 421,
    /// 422
    ERR_NOMOTD = 422,
    /// 423
    ERR_NOADMININFO = 423,
    /// 431
    ERR_NONICKNAMEGIVEN = 431,
    /// 432
    ERR_ERRONEUSNICKNAME = 432,
    /// 433
    ERR_NICKNAMEINUSE = 433,
    /// 441
    ERR_USERNOTINCHANNEL = 441,
    /// 442
    ERR_NOTONCHANNEL = 442,
    /// 443
    ERR_USERONCHANNEL = 443,
    /// 445
    ERR_SUMMONDISABLED = 445,
    /// 446
    ERR_USERSDISABLED = 446,
    /// 451
    ERR_NOTREGISTERED = 451,
    /// 461
    ERR_NEEDMOREPARAMS = 461,
    /// 462
    ERR_ALREADYREGISTRED = 462,
    /// 464
    ERR_PASSWDMISMATCH = 464,
    /// 467
    ERR_KEYSET = 467,
    /// 471
    ERR_CHANNELISFULL = 471,
    /// 472
    ERR_UNKNOWNMODE = 472,
    /// 473
    ERR_INVITEONLYCHAN = 473,
    /// 474
    ERR_BANNEDFROMCHAN = 474,
    /// 475
    ERR_BADCHANNELKEY = 475,
    /// 476
    ERR_BADCHANMASK = 476,
    /// 477
    ERR_NOCHANMODES = 477,
    /// 481
    ERR_NOPRIVILEGES = 481,
    /// 482
    ERR_CHANOPRIVSNEEDED = 482,
    /// 483
    ERR_CANTKILLSERVER = 483,
    /// 484
    ERR_RESTRICTED = 484,
    /// 485
    ERR_UNIQOPPRIVSNEEDED = 485,
    /// 491
    ERR_NOOPERHOST = 491,
    /// 501
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502
    ERR_USERSDONTMATCH = 502,
}

impl Response {
    /// The numeric value.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Whether this is an error reply (400-599).
    #[inline]
    pub const fn is_error(self) -> bool {
        let code = self.code();
        code >= 400 && code < 600
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_lookup() {
        assert_eq!(Response::from_code(433), Some(Response::ERR_NICKNAMEINUSE));
        assert_eq!(Response::from_code(999), None);
        assert_eq!(Response::RPL_WELCOME.to_string(), "001");
        assert_eq!(Response::ERR_NOSUCHNICK.name(), "ERR_NOSUCHNICK");
        assert!(Response::ERR_NOSUCHNICK.is_error());
        assert!(!Response::RPL_TOPIC.is_error());
    }
}
