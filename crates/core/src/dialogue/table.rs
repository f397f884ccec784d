use super::{GuardianRecord, Realm};

/// Shown for realms without an authored guardian.
pub const FALLBACK_INTRO: &[&str] = &[
    "...",
    "Bienvenido, Resonador.",
    "Explora este reino y encuentra su Eigenvalor.",
];

pub(super) static GUARDIANS: [(Realm, GuardianRecord); 9] = [
    (
        Realm::Cosmos,
        GuardianRecord {
            name: "Astraea",
            title: "Guardiana de las Órbitas",
            personality: "Serena y paciente; habla en ciclos y mide cada palabra como un astrónomo mide la luz.",
            intro_dialogue: &[
                "...",
                "Has cruzado el umbral de las estrellas, Resonador.",
                "Aquí todo gira: planetas, lunas, pensamientos.",
                "Escucha el ritmo de las órbitas. El Eigenvalor vibra en su armonía.",
            ],
            hints: &[
                "Las órbitas más lentas guardan los secretos más antiguos.",
                "Cuando dos cuerpos resuenan, sus periodos forman una fracción simple.",
                "Observa qué permanece inmóvil mientras todo lo demás gira.",
            ],
        },
    ),
    (
        Realm::Chaos,
        GuardianRecord {
            name: "Eris",
            title: "Señora del Desorden",
            personality: "Impredecible y burlona; se contradice a propósito y disfruta cuando el jugador duda.",
            intro_dialogue: &[
                "...",
                "¿Orden? Qué palabra tan aburrida.",
                "En mi reino, una mariposa decide el destino de una tormenta.",
                "Si buscas el Eigenvalor, busca el patrón que se esconde en el ruido.",
            ],
            hints: &[
                "Un cambio diminuto al principio lo cambia todo al final.",
                "Incluso el caos tiene atractores. Encuéntralos.",
                "Repite el mismo paso dos veces y mira si llegas al mismo lugar.",
                "No todo lo que parece aleatorio lo es.",
            ],
        },
    ),
    (
        Realm::Logos,
        GuardianRecord {
            name: "Heráclito",
            title: "Custodio de la Razón",
            personality: "Solemne y socrático; responde preguntas con otras preguntas.",
            intro_dialogue: &[
                "...",
                "Nadie se baña dos veces en el mismo río, Resonador.",
                "Este es el reino de la palabra y la lógica.",
                "Cada proposición tiene su verdad. Une las verdades y hallarás el Eigenvalor.",
            ],
            hints: &[
                "Si A implica B, y B es falso, ¿qué sabes de A?",
                "Las contradicciones señalan el camino equivocado.",
                "Una afirmación sobre sí misma puede ser una trampa.",
            ],
        },
    ),
    (
        Realm::Atomos,
        GuardianRecord {
            name: "Demócrito",
            title: "Guardián de lo Indivisible",
            personality: "Curioso y juguetón; se ríe de las cosas pequeñas porque sabe que lo son todo.",
            intro_dialogue: &[
                "...",
                "¡Ah, un visitante! Bienvenido a lo más pequeño de lo pequeño.",
                "Todo lo que ves está hecho de átomos y vacío.",
                "Divide hasta donde puedas. Lo que no se divide es el Eigenvalor.",
            ],
            hints: &[
                "Los electrones solo ocupan ciertos niveles. Nunca entre ellos.",
                "Cuenta las partículas antes y después: algo debe conservarse.",
                "Observar algo lo cambia. Mide con cuidado.",
            ],
        },
    ),
    (
        Realm::Terra,
        GuardianRecord {
            name: "Gaia",
            title: "Madre de las Capas",
            personality: "Cálida y maternal, pero firme; piensa en eras, no en días.",
            intro_dialogue: &[
                "...",
                "Bienvenido a casa, pequeño Resonador.",
                "Bajo tus pies duermen millones de años de historia.",
                "Lee las capas de la tierra. El Eigenvalor descansa en la más profunda.",
            ],
            hints: &[
                "Las capas más antiguas están siempre debajo.",
                "El agua encuentra el camino más corto. Síguela.",
                "Las placas se mueven despacio, pero nunca se detienen.",
            ],
        },
    ),
    (
        Realm::Machina,
        GuardianRecord {
            name: "Ada",
            title: "Arquitecta de Engranajes",
            personality: "Precisa y eficiente; habla en instrucciones y odia los pasos innecesarios.",
            intro_dialogue: &[
                "...",
                "Entrada detectada. Identidad: Resonador.",
                "Este reino funciona con reglas exactas. Cada engranaje tiene su propósito.",
                "Compón la secuencia correcta y la máquina te entregará el Eigenvalor.",
            ],
            hints: &[
                "Un bucle sin condición de salida nunca termina.",
                "Divide el problema en partes más pequeñas.",
                "Revisa la salida de cada engranaje antes de conectar el siguiente.",
                "Lo que entra debe salir transformado, no perdido.",
            ],
        },
    ),
    (
        Realm::Alchemy,
        GuardianRecord {
            name: "Hermes Trismegisto",
            title: "Maestro de la Transmutación",
            personality: "Enigmático y teatral; mezcla ciencia y misticismo en cada frase.",
            intro_dialogue: &[
                "...",
                "Como es arriba, es abajo, viajero.",
                "En mi laboratorio, nada se crea ni se destruye: solo se transforma.",
                "Combina los elementos en su justa proporción y el Eigenvalor se revelará.",
            ],
            hints: &[
                "Pesa los reactivos antes y después. La masa no miente.",
                "El fuego acelera, pero no decide el resultado.",
                "Algunas mezclas solo reaccionan en el orden correcto.",
            ],
        },
    ),
    (
        Realm::Bios,
        GuardianRecord {
            name: "Darwin",
            title: "Cronista de la Vida",
            personality: "Observador meticuloso; tiene anécdotas de cada especie y nunca tiene prisa.",
            intro_dialogue: &[
                "...",
                "Shh... no asustes a los pinzones.",
                "Aquí la vida se adapta, compite y coopera.",
                "Observa qué sobrevive y por qué. Ahí encontrarás el Eigenvalor.",
            ],
            hints: &[
                "No sobrevive el más fuerte, sino el que mejor se adapta.",
                "Cada rasgo tiene una historia. Pregunta de dónde viene.",
                "Los ecosistemas se equilibran solos si les das tiempo.",
            ],
        },
    ),
    (
        Realm::Psyche,
        GuardianRecord {
            name: "Psique",
            title: "Guardiana de los Sueños",
            personality: "Introspectiva y suave; habla en susurros y refleja las preguntas del jugador.",
            intro_dialogue: &[
                "...",
                "¿Estás despierto, o esto también es un sueño?",
                "Este reino está hecho de recuerdos, miedos y deseos.",
                "Mira hacia dentro, Resonador. El último Eigenvalor es el tuyo.",
            ],
            hints: &[
                "Lo que evitas mirar suele ser lo que buscas.",
                "Los recuerdos cambian cada vez que los visitas.",
                "Escucha lo que sientes antes de decidir lo que piensas.",
            ],
        },
    ),
];
