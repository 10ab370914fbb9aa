use rand::RngExt;

const FIREFOX_VERSIONS: [&str; 12] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0", "125.0", "124.0",
    "123.0", "122.0",
];

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.50",
    "133.0.6943.60",
    "132.0.6834.83",
    "132.0.6834.110",
    "131.0.6778.85",
    "131.0.6778.108",
    "130.0.6723.92",
    "130.0.6723.117",
    "129.0.6668.70",
    "129.0.6668.89",
    "128.0.6613.120",
    "128.0.6613.138",
];

const EDGE_VERSIONS: [&str; 8] = [
    "133.0.3048.56",
    "133.0.3048.46",
    "132.0.2957.55",
    "132.0.2957.63",
    "131.0.2903.86",
    "131.0.2903.112",
    "130.0.2849.68",
    "130.0.2849.80",
];

const OS_STRINGS: [&str; 12] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; WOW64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 13_6_9",
    "Macintosh; Intel Mac OS X 14_7_2",
    "Macintosh; Intel Mac OS X 15_2",
    "X11; Linux x86_64",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
    "X11; Fedora; Linux x86_64",
    "X11; Debian; Linux x86_64",
];

fn gen_firefox_ua() -> String {
    let mut rng = rand::rng();
    let version = FIREFOX_VERSIONS[rng.random_range(..FIREFOX_VERSIONS.len())];
    let os = OS_STRINGS[rng.random_range(..OS_STRINGS.len())];

    format!(
        "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
        os, version, version
    )
}

fn gen_chrome_ua() -> String {
    let mut rng = rand::rng();
    let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];
    let os = OS_STRINGS[rng.random_range(0..OS_STRINGS.len())];

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        os, version
    )
}

fn gen_edge_ua() -> String {
    let mut rng = rand::rng();
    let version = EDGE_VERSIONS[rng.random_range(0..EDGE_VERSIONS.len())];
    // Edge 主要跑在 Windows 與 macOS 上
    let os_subset = [
        "Windows NT 10.0; Win64; x64",
        "Windows NT 10.0; Win64; x64",
        "Macintosh; Intel Mac OS X 10_15_7",
        "Macintosh; Intel Mac OS X 14_7_1",
    ];
    let os = os_subset[rng.random_range(0..os_subset.len())];
    let chrome_ver = version.split('.').next().unwrap_or("133");

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36 Edg/{}",
        os, chrome_ver, version
    )
}

pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    let choice = rng.random_range(0..10);
    match choice {
        0..=5 => gen_chrome_ua(),  // 60% Chrome
        6..=7 => gen_firefox_ua(), // 20% Firefox
        8 => gen_edge_ua(),        // 10% Edge
        _ => gen_chrome_ua(),      // 10% Fallback to Chrome
    }
}
