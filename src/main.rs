use std::fs;
use std::process;

use clap::{App, Arg, ArgMatches, SubCommand};

use kpabe::error::KpAbeError;
use kpabe::schemes::gpsw06::{
    decrypt, encrypt, keygen, setup, Gpsw06Ciphertext, Gpsw06MasterKey, Gpsw06PublicKey,
    Gpsw06SecretKey,
};
use kpabe::utils::policy::pest::{parse, PolicyLanguage};

const PK_FILE: &str = "pk.key";
const MSK_FILE: &str = "msk.key";
const SK_FILE: &str = "sk.key";
const CT_FILE: &str = "ct.kpabe";

fn main() {
    let matches = App::new("kpabe")
        .version("0.1.0")
        .about("GPSW key-policy attribute-based encryption")
        .subcommand(
            SubCommand::with_name("setup")
                .about("sets up the scheme, creates msk and pk.")
                .arg(
                    Arg::with_name("attributes")
                        .long("attributes")
                        .required(true)
                        .takes_value(true)
                        .value_name("attributes")
                        .help("attribute universe, comma separated integers."),
                ),
        )
        .subcommand(
            SubCommand::with_name("keygen")
                .about("creates a decryption key for an access policy.")
                .arg(
                    Arg::with_name("policy")
                        .long("policy")
                        .required(true)
                        .takes_value(true)
                        .value_name("policy")
                        .help("access policy, e.g. '(1 or 2) and (3 or 4)'."),
                ),
        )
        .subcommand(
            SubCommand::with_name("encrypt")
                .about("encrypts a message under a set of attributes.")
                .arg(
                    Arg::with_name("attributes")
                        .long("attributes")
                        .required(true)
                        .takes_value(true)
                        .value_name("attributes")
                        .help("attribute set, comma separated integers."),
                )
                .arg(
                    Arg::with_name("message")
                        .long("message")
                        .required(true)
                        .takes_value(true)
                        .value_name("message")
                        .help("plaintext message."),
                ),
        )
        .subcommand(SubCommand::with_name("decrypt").about("decrypts a ciphertext."))
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), KpAbeError> {
    match matches.subcommand() {
        ("setup", Some(arguments)) => run_setup(arguments),
        ("keygen", Some(arguments)) => run_keygen(arguments),
        ("encrypt", Some(arguments)) => run_encrypt(arguments),
        ("decrypt", _) => run_decrypt(),
        _ => {
            eprintln!("{}", matches.usage());
            process::exit(2);
        }
    }
}

fn parse_attributes(list: &str) -> Result<Vec<u32>, KpAbeError> {
    list.split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|e| {
                KpAbeError::Io(format!("attribute '{}' is not an integer: {}", part, e))
            })
        })
        .collect()
}

fn run_setup(arguments: &ArgMatches) -> Result<(), KpAbeError> {
    let attributes = parse_attributes(arguments.value_of("attributes").unwrap())?;
    let (pk, msk) = setup(&attributes);
    fs::write(PK_FILE, serde_json::to_string(&pk)?)?;
    fs::write(MSK_FILE, serde_json::to_string(&msk)?)?;
    println!("wrote {} and {}", PK_FILE, MSK_FILE);
    Ok(())
}

fn run_keygen(arguments: &ArgMatches) -> Result<(), KpAbeError> {
    let msk: Gpsw06MasterKey = serde_json::from_str(&fs::read_to_string(MSK_FILE)?)?;
    let policy = parse(
        arguments.value_of("policy").unwrap(),
        PolicyLanguage::HumanPolicy,
    )?;
    let sk = keygen(&msk, &policy)?;
    fs::write(SK_FILE, serde_json::to_string(&sk)?)?;
    println!("wrote {} for policy {}", SK_FILE, sk.policy());
    Ok(())
}

fn run_encrypt(arguments: &ArgMatches) -> Result<(), KpAbeError> {
    let pk: Gpsw06PublicKey = serde_json::from_str(&fs::read_to_string(PK_FILE)?)?;
    let attributes = parse_attributes(arguments.value_of("attributes").unwrap())?;
    let message = arguments.value_of("message").unwrap();
    let ct = encrypt(&pk, &attributes, message)?;
    fs::write(CT_FILE, serde_json::to_string(&ct)?)?;
    println!("wrote {}", CT_FILE);
    Ok(())
}

fn run_decrypt() -> Result<(), KpAbeError> {
    let sk: Gpsw06SecretKey = serde_json::from_str(&fs::read_to_string(SK_FILE)?)?;
    let ct: Gpsw06Ciphertext = serde_json::from_str(&fs::read_to_string(CT_FILE)?)?;
    let message = decrypt(&sk, &ct)?;
    println!("{}", message);
    Ok(())
}
