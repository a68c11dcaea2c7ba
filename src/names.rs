//! Display names for barbers and customers.

/// One name per room. Also the upper bound on the number of barbers.
pub const BARBER_NAMES: [&str; 49] = [
    "Robby", "Gort", "Huey", "Dewey", "Louie", "Kryten", "Marvin", "Bender", "Data", "Lore",
    "Bishop", "Ash", "Baymax", "Wall-E", "EVE", "TARS", "CASE", "KIPP", "Sonny", "Chappie",
    "Johnny-5", "K-9", "Twiki", "Vicki", "Rosie", "Mother", "Maria", "Gigolo-Joe", "Teddy", "David-8",
    "Ava", "Kyoko", "Dolores", "Maeve", "Bernard", "Ultron", "Vision", "Jarvis", "Dum-E", "Tik-Tok",
    "Optimus", "Bumblebee", "Astro", "Atom", "Mazinger", "Gunbuster", "Doraemon", "Arale", "Zed",
];

const CUSTOMER_NAMES: [&str; 40] = [
    "Agnes", "Bruno", "Clara", "Dmitri", "Elena", "Felix", "Greta", "Hugo", "Ingrid", "Jonas",
    "Katja", "Lars", "Mira", "Nils", "Olga", "Pavel", "Quinn", "Rosa", "Sven", "Tilda",
    "Ulrich", "Vera", "Wendel", "Xenia", "Yusuf", "Zora", "Anton", "Bea", "Cyril", "Dora",
    "Emil", "Frida", "Gustav", "Hedda", "Ivo", "Jana", "Karl", "Lotte", "Milos", "Nadia",
];

/// Name of the barber working room `room`.
pub fn barber_name(room: usize) -> &'static str {
    BARBER_NAMES[room % BARBER_NAMES.len()]
}

/// Name for the customer at table position `index` (wraps around).
pub fn customer_name(index: usize) -> &'static str {
    CUSTOMER_NAMES[index % CUSTOMER_NAMES.len()]
}

pub fn customer_name_count() -> usize {
    CUSTOMER_NAMES.len()
}
